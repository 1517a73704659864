//! Execution decision types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use super::Opportunity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExecutionStatus {
    /// Handed off to the transaction-submission collaborator.
    Executed,
    /// Read-only mode: the opportunity cleared the floor but no signing key
    /// is configured.
    Simulated,
    Skipped,
    Failed,
}

/// Terminal outcome of the decision engine for one opportunity.
/// Appended to the orchestrator's in-memory ledger, never removed.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub id: String,
    pub status: ExecutionStatus,
    pub opportunity: Opportunity,
    pub reason: Option<String>,
    /// Estimated gas cost in the native gas-paying asset, when available.
    pub gas_cost_estimate: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

impl ExecutionResult {
    pub fn new(
        status: ExecutionStatus,
        opportunity: Opportunity,
        reason: Option<String>,
        gas_cost_estimate: Option<Decimal>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            status,
            opportunity,
            reason,
            gas_cost_estimate,
            timestamp: Utc::now(),
        }
    }
}
