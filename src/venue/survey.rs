//! Startup pool survey
//!
//! Walks every unordered pair of verified tokens on a venue, resolves the
//! pool and logs its reserves. Purely informational: a picture of what the
//! venue can actually quote before the scan loop starts.

use tracing::{debug, info, warn};
use crate::{
    types::{pair_label, TokenRef},
    venue::{DexVenue, QuoteSource},
};

pub async fn survey_pools(venue: &DexVenue, universe: &[TokenRef]) -> usize {
    let mut found = 0;

    for i in 0..universe.len() {
        for j in (i + 1)..universe.len() {
            let (a, b) = (&universe[i], &universe[j]);
            let label = pair_label(a, b);

            match venue.resolve_pair(a, b).await {
                Ok(Some(pair)) => match venue.get_reserves(pair).await {
                    Ok((r0, r1)) => {
                        info!("   {} @ {} reserves: ({}, {})", label, pair, r0, r1);
                        found += 1;
                    }
                    Err(e) => warn!("   {} @ {} reserves unavailable: {}", label, pair, e),
                },
                Ok(None) => debug!("   {} has no pool on {}", label, venue.name()),
                Err(e) => warn!("   {} lookup failed on {}: {}", label, venue.name(), e),
            }
        }
    }

    info!("🏊 {} pools found on {}", found, venue.name());
    found
}
