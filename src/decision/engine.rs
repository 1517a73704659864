//! Opportunity → ExecutionResult state machine
//!
//! Terminal states: Executed, Simulated, Skipped, Failed. Without a signing
//! credential every profitable opportunity terminates at Simulated; funds
//! never move from this crate either way, execution is a hand-off to the
//! submission collaborator.

use chrono::Utc;
use rust_decimal::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use crate::{
    config::RiskSettings,
    errors::BotResult,
    network::gas::{cost_in_native, GasOracle, GWEI_IN_WEI},
    submission::{SubmissionService, SwapInstruction},
    types::{AccessMode, ExecutionResult, ExecutionStatus, Opportunity},
};

const SWAP_DEADLINE_SECS: i64 = 1200;

pub struct DecisionEngine {
    mode: AccessMode,
    gas: Arc<dyn GasOracle>,
    submitter: Arc<dyn SubmissionService>,
    gas_limit: u64,
    fallback_gas_price_wei: u128,
    // At most one in-flight submission: the collaborator owns nonce
    // allocation and must see executions strictly serialized.
    submission_lock: Mutex<()>,
}

impl DecisionEngine {
    pub fn new(
        mode: AccessMode,
        gas: Arc<dyn GasOracle>,
        submitter: Arc<dyn SubmissionService>,
        risk: &RiskSettings,
    ) -> Self {
        Self {
            mode,
            gas,
            submitter,
            gas_limit: risk.gas_limit_per_tx,
            fallback_gas_price_wei: risk.fallback_gas_price_gwei as u128 * GWEI_IN_WEI,
            submission_lock: Mutex::new(()),
        }
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Never panics and never propagates: an unexpected decisioning error
    /// becomes a Failed result so the scan loop keeps running.
    pub async fn decide(&self, opportunity: Opportunity) -> ExecutionResult {
        match self.try_decide(&opportunity).await {
            Ok(result) => result,
            Err(e) => ExecutionResult::new(
                ExecutionStatus::Failed,
                opportunity,
                Some(e.to_string()),
                None,
            ),
        }
    }

    async fn try_decide(&self, opportunity: &Opportunity) -> BotResult<ExecutionResult> {
        if !opportunity.profitable {
            return Ok(ExecutionResult::new(
                ExecutionStatus::Skipped,
                opportunity.clone(),
                Some("below_threshold".to_string()),
                None,
            ));
        }

        if self.mode == AccessMode::ReadOnly {
            // Default safety-first posture: found it, won't touch it. The
            // fallback constant prices the estimate since no live read is
            // warranted for a decision that cannot execute.
            let gas_estimate = cost_in_native(self.fallback_gas_price_wei, self.gas_limit);
            return Ok(ExecutionResult::new(
                ExecutionStatus::Simulated,
                opportunity.clone(),
                Some("no_private_key".to_string()),
                Some(gas_estimate),
            ));
        }

        let gas_price_wei = match self.gas.gas_price().await {
            Ok(price) => price,
            Err(e) => {
                // A funded decision with a stale gas estimate is worse than
                // no decision
                return Ok(ExecutionResult::new(
                    ExecutionStatus::Failed,
                    opportunity.clone(),
                    Some(format!("gas_price_unavailable: {}", e)),
                    None,
                ));
            }
        };

        let gas_cost = cost_in_native(gas_price_wei, self.gas_limit);
        // Profit on a 1-unit principal, taken in the principal token's own
        // terms; comparing it against native-denominated gas is the same
        // flat-quote simplification the scoring uses.
        let profit_estimate =
            Decimal::from_f64(opportunity.profit_pct / 100.0).unwrap_or_default();

        if gas_cost >= profit_estimate {
            return Ok(ExecutionResult::new(
                ExecutionStatus::Skipped,
                opportunity.clone(),
                Some("gas_exceeds_profit".to_string()),
                Some(gas_cost),
            ));
        }

        let instructions = build_instructions(opportunity);

        let _guard = self.submission_lock.lock().await;
        let receipt = self.submitter.submit(&instructions).await?;

        if receipt.success {
            if let Some(tx_hash) = &receipt.tx_hash {
                info!("🚀 handed off {} as {}", opportunity.path_label(), tx_hash);
            }
            Ok(ExecutionResult::new(
                ExecutionStatus::Executed,
                opportunity.clone(),
                None,
                Some(gas_cost),
            ))
        } else {
            Ok(ExecutionResult::new(
                ExecutionStatus::Failed,
                opportunity.clone(),
                Some(
                    receipt
                        .error
                        .unwrap_or_else(|| "submission rejected without detail".to_string()),
                ),
                Some(gas_cost),
            ))
        }
    }
}

fn build_instructions(opportunity: &Opportunity) -> Vec<SwapInstruction> {
    let deadline = Utc::now() + chrono::Duration::seconds(SWAP_DEADLINE_SECS);
    opportunity
        .legs
        .iter()
        .map(|leg| SwapInstruction {
            from_token: leg.token_in.address,
            to_token: leg.token_out.address,
            amount_in: leg.amount_in,
            min_amount_out: leg.amount_out,
            deadline,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;
    use rust_decimal_macros::dec;
    use crate::{
        network::gas::mocks::{FailingGas, FixedGas},
        submission::mocks::RecordingSubmitter,
        submission::UnwiredSubmitter,
        types::{OpportunityKind, Quote, TokenRef},
    };

    fn risk() -> RiskSettings {
        RiskSettings {
            gas_limit_per_tx: 250_000,
            fallback_gas_price_gwei: 30,
        }
    }

    fn opportunity(profit_pct: f64) -> Opportunity {
        let wcore = TokenRef::new("WCORE", Address::repeat_byte(1), 18);
        let ice = TokenRef::new("ICE", Address::repeat_byte(2), 18);
        let score = TokenRef::new("SCORE", Address::repeat_byte(3), 18);
        let legs = vec![
            Quote::new("icecreamswap", wcore.clone(), ice.clone(), dec!(1), dec!(2)),
            Quote::new("icecreamswap", ice, score.clone(), dec!(2), dec!(4)),
            Quote::new("icecreamswap", score, wcore, dec!(4), dec!(1.2)),
        ];
        Opportunity::new(
            OpportunityKind::Triangular,
            legs,
            vec!["icecreamswap".to_string()],
            profit_pct,
            0.3,
        )
    }

    fn engine(
        mode: AccessMode,
        gas: Arc<dyn GasOracle>,
        submitter: Arc<dyn SubmissionService>,
    ) -> DecisionEngine {
        DecisionEngine::new(mode, gas, submitter, &risk())
    }

    #[tokio::test]
    async fn read_only_simulates_profitable_regardless_of_gas() {
        // Even a dead gas oracle cannot change a read-only outcome
        let engine = engine(
            AccessMode::ReadOnly,
            Arc::new(FailingGas),
            Arc::new(UnwiredSubmitter),
        );

        let result = engine.decide(opportunity(20.0)).await;
        assert_eq!(result.status, ExecutionStatus::Simulated);
        assert_eq!(result.reason.as_deref(), Some("no_private_key"));
        assert!(result.gas_cost_estimate.is_some());
    }

    #[tokio::test]
    async fn read_only_skips_below_floor() {
        let engine = engine(
            AccessMode::ReadOnly,
            Arc::new(FailingGas),
            Arc::new(UnwiredSubmitter),
        );

        let result = engine.decide(opportunity(0.2)).await;
        assert_eq!(result.status, ExecutionStatus::Skipped);
        assert_eq!(result.reason.as_deref(), Some("below_threshold"));
    }

    #[tokio::test]
    async fn funded_with_failing_gas_lookup_fails_the_decision() {
        let engine = engine(
            AccessMode::Funded,
            Arc::new(FailingGas),
            Arc::new(UnwiredSubmitter),
        );

        let result = engine.decide(opportunity(20.0)).await;
        assert_eq!(result.status, ExecutionStatus::Failed);
        assert!(result.reason.unwrap().starts_with("gas_price_unavailable"));
    }

    #[tokio::test]
    async fn funded_executes_when_gas_is_below_profit() {
        let submitter = Arc::new(RecordingSubmitter::accepting());
        // 1 gwei * 250k gas = 0.00025 native, far under 20% of a unit
        let engine = engine(AccessMode::Funded, Arc::new(FixedGas(GWEI_IN_WEI)), submitter.clone());

        let result = engine.decide(opportunity(20.0)).await;
        assert_eq!(result.status, ExecutionStatus::Executed);
        assert_eq!(result.gas_cost_estimate, Some(dec!(0.00025)));

        let submitted = submitter.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].len(), 3);
        assert_eq!(submitted[0][2].min_amount_out, dec!(1.2));
    }

    #[tokio::test]
    async fn funded_skips_when_gas_swallows_profit() {
        // 50 gwei * 250k gas = 0.0125, above the 1% of a unit profit
        let engine = engine(
            AccessMode::Funded,
            Arc::new(FixedGas(50 * GWEI_IN_WEI)),
            Arc::new(RecordingSubmitter::accepting()),
        );

        let result = engine.decide(opportunity(1.0)).await;
        assert_eq!(result.status, ExecutionStatus::Skipped);
        assert_eq!(result.reason.as_deref(), Some("gas_exceeds_profit"));
    }

    #[tokio::test]
    async fn submission_rejection_preserves_upstream_error() {
        let engine = engine(
            AccessMode::Funded,
            Arc::new(FixedGas(GWEI_IN_WEI)),
            Arc::new(RecordingSubmitter::rejecting("insufficient WCORE balance")),
        );

        let result = engine.decide(opportunity(20.0)).await;
        assert_eq!(result.status, ExecutionStatus::Failed);
        assert_eq!(result.reason.as_deref(), Some("insufficient WCORE balance"));
    }

    #[tokio::test]
    async fn unwired_submitter_fails_loudly() {
        let engine = engine(
            AccessMode::Funded,
            Arc::new(FixedGas(GWEI_IN_WEI)),
            Arc::new(UnwiredSubmitter),
        );

        let result = engine.decide(opportunity(20.0)).await;
        assert_eq!(result.status, ExecutionStatus::Failed);
        assert!(result.reason.unwrap().contains("not wired up"));
    }
}
