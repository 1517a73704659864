//! Interface to the external transaction-submission service
//!
//! The decision engine hands profitable opportunities across this boundary
//! and nothing more: building, signing and broadcasting swaps live outside
//! this crate. Submission failures come back verbatim so the ledger keeps
//! the upstream error text.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use crate::errors::{BotError, BotResult};

#[derive(Debug, Clone, Serialize)]
pub struct SwapInstruction {
    pub from_token: alloy::primitives::Address,
    pub to_token: alloy::primitives::Address,
    pub amount_in: Decimal,
    pub min_amount_out: Decimal,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub tx_hash: Option<String>,
    pub success: bool,
    pub error: Option<String>,
}

#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Submit the legs of one opportunity as a unit. Callers serialize
    /// submissions; implementations own nonce allocation.
    async fn submit(&self, legs: &[SwapInstruction]) -> BotResult<SubmissionReceipt>;
}

/// Placeholder binding for deployments where no submission service is
/// wired up. Refuses loudly instead of fabricating transaction hashes, so
/// a funded key without real execution plumbing surfaces as Failed results
/// rather than imaginary fills.
pub struct UnwiredSubmitter;

#[async_trait]
impl SubmissionService for UnwiredSubmitter {
    async fn submit(&self, _legs: &[SwapInstruction]) -> BotResult<SubmissionReceipt> {
        Err(BotError::Submission(
            "transaction submission service is not wired up".to_string(),
        ))
    }
}

#[cfg(test)]
pub(crate) mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Records submitted legs and answers with a canned receipt.
    pub struct RecordingSubmitter {
        pub submitted: Mutex<Vec<Vec<SwapInstruction>>>,
        pub response: BotResult<SubmissionReceipt>,
    }

    impl RecordingSubmitter {
        pub fn accepting() -> Self {
            Self {
                submitted: Mutex::new(Vec::new()),
                response: Ok(SubmissionReceipt {
                    tx_hash: Some("0xabc123".to_string()),
                    success: true,
                    error: None,
                }),
            }
        }

        pub fn rejecting(error: &str) -> Self {
            Self {
                submitted: Mutex::new(Vec::new()),
                response: Ok(SubmissionReceipt {
                    tx_hash: None,
                    success: false,
                    error: Some(error.to_string()),
                }),
            }
        }
    }

    #[async_trait]
    impl SubmissionService for RecordingSubmitter {
        async fn submit(&self, legs: &[SwapInstruction]) -> BotResult<SubmissionReceipt> {
            self.submitted.lock().unwrap().push(legs.to_vec());
            match &self.response {
                Ok(receipt) => Ok(receipt.clone()),
                Err(BotError::Submission(msg)) => Err(BotError::Submission(msg.clone())),
                Err(_) => Err(BotError::Submission("mock".to_string())),
            }
        }
    }
}
