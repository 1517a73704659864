//! Cross-venue price gap detection
//!
//! One quote per venue per token pair; every unordered venue pair with two
//! successful quotes is compared. A venue whose quote failed is excluded
//! from the comparison set for the tick, never treated as zero.
//!
//! Prices are flat 1-unit quotes: price impact at realistic trade size is a
//! documented limitation, not modeled here.

use futures::{future, stream, StreamExt};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::sync::Arc;
use crate::{
    errors::BotError,
    scanner::{ScanThresholds, TickReport},
    types::{Opportunity, OpportunityKind, Quote, TokenRef},
    venue::QuoteSource,
};

struct PairOutcome {
    opportunities: Vec<Opportunity>,
    quotes_ok: u64,
    no_liquidity: u64,
    rpc_failures: u64,
}

pub async fn scan_cross_venue(
    venues: &[Arc<dyn QuoteSource>],
    universe: &[TokenRef],
    thresholds: ScanThresholds,
    fan_out: usize,
) -> TickReport {
    if venues.len() < 2 || universe.len() < 2 {
        return TickReport::default();
    }

    let mut pairs = Vec::new();
    for i in 0..universe.len() {
        for j in (i + 1)..universe.len() {
            pairs.push((i, j));
        }
    }

    let outcomes: Vec<PairOutcome> = stream::iter(pairs)
        .map(|(i, j)| compare_pair(venues, &universe[i], &universe[j], thresholds))
        .buffer_unordered(fan_out.max(1))
        .collect()
        .await;

    let mut report = TickReport::default();
    for outcome in outcomes {
        report.opportunities.extend(outcome.opportunities);
        report.quotes_ok += outcome.quotes_ok;
        report.no_liquidity += outcome.no_liquidity;
        report.rpc_failures += outcome.rpc_failures;
    }
    report
}

async fn compare_pair(
    venues: &[Arc<dyn QuoteSource>],
    token_in: &TokenRef,
    token_out: &TokenRef,
    thresholds: ScanThresholds,
) -> PairOutcome {
    let mut outcome = PairOutcome {
        opportunities: Vec::new(),
        quotes_ok: 0,
        no_liquidity: 0,
        rpc_failures: 0,
    };

    let results =
        future::join_all(venues.iter().map(|v| v.quote(token_in, token_out, dec!(1)))).await;

    let mut quoted: Vec<Quote> = Vec::new();
    for result in results {
        match result {
            Ok(quote) => {
                outcome.quotes_ok += 1;
                quoted.push(quote);
            }
            Err(BotError::NoLiquidity { .. }) => {
                outcome.no_liquidity += 1;
            }
            Err(_) => {
                outcome.rpc_failures += 1;
            }
        }
    }

    // At least two venues must have answered for a comparison to exist
    if quoted.len() < 2 {
        return outcome;
    }

    for x in 0..quoted.len() {
        for y in (x + 1)..quoted.len() {
            let (buy, sell) = if quoted[x].amount_out <= quoted[y].amount_out {
                (&quoted[x], &quoted[y])
            } else {
                (&quoted[y], &quoted[x])
            };

            if buy.amount_out.is_zero() {
                continue;
            }

            let profit_pct = ((sell.amount_out / buy.amount_out - dec!(1)) * dec!(100))
                .to_f64()
                .unwrap_or(0.0);

            if profit_pct > thresholds.report_floor_pct {
                outcome.opportunities.push(Opportunity::new(
                    OpportunityKind::CrossVenue,
                    vec![buy.clone(), sell.clone()],
                    vec![buy.venue.clone(), sell.venue.clone()],
                    profit_pct,
                    thresholds.profit_floor_pct,
                ));
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::testing::{thresholds, universe, DeadVenue, MockVenue};

    #[tokio::test]
    async fn price_gap_identifies_buy_and_sell_venues() {
        let venues: Vec<Arc<dyn QuoteSource>> = vec![
            Arc::new(MockVenue::new("venue-x", &[("WCORE", "ICE", dec!(1.0))])),
            Arc::new(MockVenue::new("venue-y", &[("WCORE", "ICE", dec!(1.05))])),
        ];
        let tokens = universe(&["WCORE", "ICE"]);

        let report = scan_cross_venue(&venues, &tokens, thresholds(), 4).await;

        assert_eq!(report.opportunities.len(), 1);
        let opp = &report.opportunities[0];
        assert_eq!(opp.kind, OpportunityKind::CrossVenue);
        assert_eq!(opp.venues, vec!["venue-x".to_string(), "venue-y".to_string()]);
        assert!((opp.profit_pct - 5.0).abs() < 1e-9);
        assert!(opp.profitable);
        assert_eq!(opp.legs.len(), 2);
        assert_eq!(opp.legs[0].venue, "venue-x");
    }

    #[tokio::test]
    async fn failed_venue_is_excluded_not_zeroed() {
        let venues: Vec<Arc<dyn QuoteSource>> = vec![
            Arc::new(MockVenue::new("venue-x", &[("WCORE", "ICE", dec!(1.0))])),
            Arc::new(DeadVenue("venue-dead".to_string())),
            Arc::new(MockVenue::new("venue-y", &[("WCORE", "ICE", dec!(1.05))])),
        ];
        let tokens = universe(&["WCORE", "ICE"]);

        let report = scan_cross_venue(&venues, &tokens, thresholds(), 4).await;

        // The dead venue never shows up as a fake 0-price buy side
        assert_eq!(report.opportunities.len(), 1);
        assert_eq!(
            report.opportunities[0].venues,
            vec!["venue-x".to_string(), "venue-y".to_string()]
        );
        assert_eq!(report.rpc_failures, 1);
    }

    #[tokio::test]
    async fn single_answering_venue_yields_no_comparison() {
        let venues: Vec<Arc<dyn QuoteSource>> = vec![
            Arc::new(MockVenue::new("venue-x", &[("WCORE", "ICE", dec!(1.0))])),
            Arc::new(DeadVenue("venue-dead".to_string())),
        ];
        let tokens = universe(&["WCORE", "ICE"]);

        let report = scan_cross_venue(&venues, &tokens, thresholds(), 4).await;
        assert!(report.opportunities.is_empty());
        assert_eq!(report.quotes_ok, 1);
    }

    #[tokio::test]
    async fn identical_prices_produce_no_gap() {
        let venues: Vec<Arc<dyn QuoteSource>> = vec![
            Arc::new(MockVenue::new("venue-x", &[("WCORE", "ICE", dec!(1.0))])),
            Arc::new(MockVenue::new("venue-y", &[("WCORE", "ICE", dec!(1.0))])),
        ];
        let tokens = universe(&["WCORE", "ICE"]);

        let report = scan_cross_venue(&venues, &tokens, thresholds(), 4).await;
        assert!(report.opportunities.is_empty());
    }

    #[tokio::test]
    async fn single_venue_configuration_skips_the_pass() {
        let venues: Vec<Arc<dyn QuoteSource>> = vec![Arc::new(MockVenue::new(
            "venue-x",
            &[("WCORE", "ICE", dec!(1.0))],
        ))];
        let tokens = universe(&["WCORE", "ICE"]);

        let report = scan_cross_venue(&venues, &tokens, thresholds(), 4).await;
        assert!(report.opportunities.is_empty());
        assert_eq!(report.quotes_ok, 0);
    }
}
