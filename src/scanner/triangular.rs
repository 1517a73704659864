//! Triangular cycle enumeration and scoring
//!
//! All 3-token cycles over the verified universe on a single venue. The
//! enumeration is O(n³) quote calls per tick by design; the universe is
//! expected to stay small (≤ 10 tokens). Scanning large token sets needs a
//! liquid-pairs graph restriction that is deliberately not built here.

use futures::{stream, StreamExt};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::debug;
use crate::{
    errors::BotError,
    scanner::{ScanThresholds, TickReport},
    types::{Opportunity, OpportunityKind, Quote, TokenRef},
    venue::QuoteSource,
};

struct CycleOutcome {
    opportunity: Option<Opportunity>,
    quotes_ok: u64,
    no_liquidity: u64,
    rpc_failures: u64,
}

pub async fn scan_triangular(
    venue: &Arc<dyn QuoteSource>,
    universe: &[TokenRef],
    thresholds: ScanThresholds,
    fan_out: usize,
) -> TickReport {
    let n = universe.len();
    if n < 3 {
        return TickReport::default();
    }

    // Each directed cycle once: the lowest-indexed token is the fixed
    // starting point, so rotations of the same cycle are not re-quoted.
    let mut cycles = Vec::new();
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                if i < j && i < k && j != k {
                    cycles.push((i, j, k));
                }
            }
        }
    }

    // Cycles run concurrently up to the fan-out cap; the legs inside one
    // cycle stay strictly sequential (each consumes the previous output).
    let outcomes: Vec<CycleOutcome> = stream::iter(cycles)
        .map(|(i, j, k)| {
            evaluate_cycle(venue, &universe[i], &universe[j], &universe[k], thresholds)
        })
        .buffer_unordered(fan_out.max(1))
        .collect()
        .await;

    let mut report = TickReport::default();
    for outcome in outcomes {
        report.quotes_ok += outcome.quotes_ok;
        report.no_liquidity += outcome.no_liquidity;
        report.rpc_failures += outcome.rpc_failures;
        if let Some(opp) = outcome.opportunity {
            report.opportunities.push(opp);
        }
    }
    report
}

/// Quote the closed cycle a → b → c → a for a principal of 1 unit of `a`.
/// Any failed leg discards the whole cycle: not reported, not an error.
async fn evaluate_cycle(
    venue: &Arc<dyn QuoteSource>,
    a: &TokenRef,
    b: &TokenRef,
    c: &TokenRef,
    thresholds: ScanThresholds,
) -> CycleOutcome {
    let mut outcome = CycleOutcome {
        opportunity: None,
        quotes_ok: 0,
        no_liquidity: 0,
        rpc_failures: 0,
    };

    let mut legs: Vec<Quote> = Vec::with_capacity(3);
    let mut amount = dec!(1);

    for (token_in, token_out) in [(a, b), (b, c), (c, a)] {
        match venue.quote(token_in, token_out, amount).await {
            Ok(quote) => {
                outcome.quotes_ok += 1;
                amount = quote.amount_out;
                legs.push(quote);
            }
            Err(BotError::NoLiquidity { .. }) => {
                outcome.no_liquidity += 1;
                return outcome;
            }
            Err(e) => {
                debug!(
                    "dropping cycle {}→{}→{}→{} on {}: {}",
                    a, b, c, a,
                    venue.name(),
                    e
                );
                outcome.rpc_failures += 1;
                return outcome;
            }
        }
    }

    let final_out = legs[2].amount_out;
    let profit_pct = ((final_out - dec!(1)) * dec!(100))
        .to_f64()
        .unwrap_or(0.0);

    if profit_pct > thresholds.report_floor_pct {
        outcome.opportunity = Some(Opportunity::new(
            OpportunityKind::Triangular,
            legs,
            vec![venue.name().to_string()],
            profit_pct,
            thresholds.profit_floor_pct,
        ));
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::testing::{thresholds, universe, DeadVenue, MockVenue};

    fn venue_with(rates: &[(&str, &str, Decimal)]) -> Arc<dyn QuoteSource> {
        Arc::new(MockVenue::new("icecreamswap", rates))
    }

    #[tokio::test]
    async fn three_token_universe_yields_exactly_one_scored_cycle() {
        let venue = venue_with(&[
            ("WCORE", "ICE", dec!(2.0)),
            ("ICE", "SCORE", dec!(2.0)),
            ("SCORE", "WCORE", dec!(0.3)),
        ]);
        let tokens = universe(&["WCORE", "ICE", "SCORE"]);

        let report = scan_triangular(&venue, &tokens, thresholds(), 4).await;

        assert_eq!(report.opportunities.len(), 1);
        let opp = &report.opportunities[0];
        // (2.0 × 2.0 × 0.3 − 1) × 100
        assert!((opp.profit_pct - 20.0).abs() < 1e-9);
        assert!(opp.profitable);
        assert_eq!(opp.kind, OpportunityKind::Triangular);
        assert_eq!(opp.venues, vec!["icecreamswap".to_string()]);
    }

    #[tokio::test]
    async fn cycle_is_closed_and_legs_chain_amounts() {
        let venue = venue_with(&[
            ("WCORE", "ICE", dec!(2.0)),
            ("ICE", "SCORE", dec!(2.0)),
            ("SCORE", "WCORE", dec!(0.3)),
        ]);
        let tokens = universe(&["WCORE", "ICE", "SCORE"]);

        let report = scan_triangular(&venue, &tokens, thresholds(), 4).await;
        let legs = &report.opportunities[0].legs;

        assert_eq!(legs.len(), 3);
        assert_eq!(legs[0].token_in.symbol, "WCORE");
        assert_eq!(legs[2].token_out.symbol, "WCORE");
        assert_eq!(legs[1].amount_in, legs[0].amount_out);
        assert_eq!(legs[2].amount_in, legs[1].amount_out);
        assert_eq!(legs[2].amount_out, dec!(1.2));
    }

    #[tokio::test]
    async fn unquotable_middle_leg_drops_the_whole_cycle() {
        // ICE→SCORE has no pool; nothing else completes a cycle either
        let venue = venue_with(&[
            ("WCORE", "ICE", dec!(2.0)),
            ("SCORE", "WCORE", dec!(0.3)),
        ]);
        let tokens = universe(&["WCORE", "ICE", "SCORE"]);

        let report = scan_triangular(&venue, &tokens, thresholds(), 4).await;

        assert!(report.opportunities.is_empty());
        assert!(report.no_liquidity > 0);
        assert_eq!(report.rpc_failures, 0);
    }

    #[tokio::test]
    async fn sub_floor_discrepancies_are_invisible() {
        // Product 1.0005 → 0.05%, below the 0.1% reporting floor
        let venue = venue_with(&[
            ("WCORE", "ICE", dec!(1.0)),
            ("ICE", "SCORE", dec!(1.0)),
            ("SCORE", "WCORE", dec!(1.0005)),
        ]);
        let tokens = universe(&["WCORE", "ICE", "SCORE"]);

        let report = scan_triangular(&venue, &tokens, thresholds(), 4).await;
        assert!(report.opportunities.is_empty());
        assert_eq!(report.quotes_ok, 3);
    }

    #[tokio::test]
    async fn near_miss_is_surfaced_but_not_profitable() {
        // Product 1.002 → 0.2%: above the 0.1% report floor, below the
        // 0.3% profit floor
        let venue = venue_with(&[
            ("WCORE", "ICE", dec!(1.0)),
            ("ICE", "SCORE", dec!(1.0)),
            ("SCORE", "WCORE", dec!(1.002)),
        ]);
        let tokens = universe(&["WCORE", "ICE", "SCORE"]);

        let report = scan_triangular(&venue, &tokens, thresholds(), 4).await;

        assert_eq!(report.opportunities.len(), 1);
        assert!(!report.opportunities[0].profitable);
    }

    #[tokio::test]
    async fn dead_venue_reports_only_rpc_failures() {
        let venue: Arc<dyn QuoteSource> = Arc::new(DeadVenue("icecreamswap".to_string()));
        let tokens = universe(&["WCORE", "ICE", "SCORE"]);

        let report = scan_triangular(&venue, &tokens, thresholds(), 4).await;

        assert!(report.opportunities.is_empty());
        assert_eq!(report.quotes_ok, 0);
        assert!(report.fully_degraded());
    }

    #[tokio::test]
    async fn fewer_than_three_tokens_scans_nothing() {
        let venue = venue_with(&[("WCORE", "ICE", dec!(2.0))]);
        let tokens = universe(&["WCORE", "ICE"]);

        let report = scan_triangular(&venue, &tokens, thresholds(), 4).await;
        assert!(report.opportunities.is_empty());
        assert_eq!(report.quotes_ok + report.no_liquidity + report.rpc_failures, 0);
    }
}
