//! Opportunity observation storage

use anyhow::Result;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;
use crate::types::Opportunity;

/// Append one surfaced opportunity to the day's JSONL file. Observability
/// only; the in-memory state is authoritative.
pub fn save_opportunity(opp: &Opportunity) -> Result<()> {
    let filename = format!(
        "output/opportunities/scan_{}.jsonl",
        Utc::now().format("%Y-%m-%d")
    );

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&filename)?;

    writeln!(file, "{}", serde_json::to_string(opp)?)?;

    debug!(
        opportunity_id = %opp.id,
        profit_pct = opp.profit_pct,
        profitable = opp.profitable,
        "Saved opportunity observation"
    );

    Ok(())
}
