//! Opportunity scanning: one finite pass per tick

pub mod triangular;
pub mod cross_venue;

pub use triangular::*;
pub use cross_venue::*;

use std::sync::Arc;
use crate::{
    config::ArbitrageSettings,
    types::{Opportunity, TokenRef},
    venue::QuoteSource,
};

/// Two-tier floors, both in percent. Discrepancies at or below the report
/// floor stay invisible; the profit floor marks an opportunity actionable.
#[derive(Debug, Clone, Copy)]
pub struct ScanThresholds {
    pub report_floor_pct: f64,
    pub profit_floor_pct: f64,
}

impl From<&ArbitrageSettings> for ScanThresholds {
    fn from(settings: &ArbitrageSettings) -> Self {
        Self {
            report_floor_pct: settings.report_floor_pct(),
            profit_floor_pct: settings.profit_floor_pct(),
        }
    }
}

/// Outcome of one scan tick. The quote counters let the orchestrator tell
/// a quiet market (quotes fine, nothing found) from a dead RPC connection.
#[derive(Debug, Default)]
pub struct TickReport {
    pub opportunities: Vec<Opportunity>,
    pub quotes_ok: u64,
    /// Structural "no pool" results; the node answered, so these do not
    /// indicate connection trouble.
    pub no_liquidity: u64,
    pub rpc_failures: u64,
}

impl TickReport {
    pub fn absorb(&mut self, other: TickReport) {
        self.opportunities.extend(other.opportunities);
        self.quotes_ok += other.quotes_ok;
        self.no_liquidity += other.no_liquidity;
        self.rpc_failures += other.rpc_failures;
    }

    /// True when every quote call failed at the RPC layer.
    pub fn fully_degraded(&self) -> bool {
        self.rpc_failures > 0 && self.quotes_ok == 0 && self.no_liquidity == 0
    }
}

/// One full scan pass: triangular cycles on every venue, then cross-venue
/// comparisons when at least two venues are configured.
pub async fn run_scan(
    venues: &[Arc<dyn QuoteSource>],
    universe: &[TokenRef],
    thresholds: ScanThresholds,
    fan_out: usize,
) -> TickReport {
    let mut report = TickReport::default();

    for venue in venues {
        report.absorb(scan_triangular(venue, universe, thresholds, fan_out).await);
    }

    if venues.len() >= 2 {
        report.absorb(scan_cross_venue(venues, universe, thresholds, fan_out).await);
    }

    report
}
