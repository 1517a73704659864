//! Process-lifetime scan statistics

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use super::{ExecutionResult, ExecutionStatus};

/// Running counters owned by the orchestrator. Reset only on restart.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    pub scan_count: u64,
    pub opportunities_found: u64,
    pub executed_count: u64,
    /// Sum of `profit_pct / 100` over Executed and Simulated results.
    /// An estimate, not settled PnL.
    pub simulated_profit_accum: Decimal,
}

impl ScanStats {
    pub fn record_tick(&mut self) {
        self.scan_count += 1;
    }

    pub fn record_opportunities(&mut self, count: usize) {
        self.opportunities_found += count as u64;
    }

    pub fn record_result(&mut self, result: &ExecutionResult) {
        match result.status {
            ExecutionStatus::Executed => {
                self.executed_count += 1;
                self.accumulate(result.opportunity.profit_pct);
            }
            ExecutionStatus::Simulated => {
                self.accumulate(result.opportunity.profit_pct);
            }
            ExecutionStatus::Skipped | ExecutionStatus::Failed => {}
        }
    }

    fn accumulate(&mut self, profit_pct: f64) {
        if let Some(d) = Decimal::from_f64(profit_pct / 100.0) {
            self.simulated_profit_accum += d;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Opportunity, OpportunityKind, Quote, TokenRef};
    use alloy::primitives::Address;
    use rust_decimal_macros::dec;

    fn opp(profit_pct: f64) -> Opportunity {
        let a = TokenRef::new("WCORE", Address::ZERO, 18);
        let b = TokenRef::new("ICE", Address::repeat_byte(1), 18);
        let leg = Quote::new("icecreamswap", a, b, dec!(1), dec!(2));
        Opportunity::new(
            OpportunityKind::CrossVenue,
            vec![leg.clone(), leg],
            vec!["x".to_string(), "y".to_string()],
            profit_pct,
            0.3,
        )
    }

    #[test]
    fn executed_and_simulated_accumulate_profit() {
        let mut stats = ScanStats::default();
        stats.record_result(&ExecutionResult::new(
            ExecutionStatus::Executed,
            opp(1.0),
            None,
            None,
        ));
        stats.record_result(&ExecutionResult::new(
            ExecutionStatus::Simulated,
            opp(2.0),
            None,
            None,
        ));
        stats.record_result(&ExecutionResult::new(
            ExecutionStatus::Skipped,
            opp(50.0),
            Some("below_threshold".to_string()),
            None,
        ));

        assert_eq!(stats.executed_count, 1);
        assert_eq!(stats.simulated_profit_accum, dec!(0.03));
    }
}
