//! Custom error types for the bot

use thiserror::Error;

/// Failure taxonomy for the scan/decide pipeline.
///
/// `Rpc` and `NoLiquidity` are absorbed at the smallest possible scope (a
/// single quote or leg) and drop that cycle/pair from the current tick.
/// `Config` is fatal and only surfaces before the scan loop starts.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("RPC failure: {context}")]
    Rpc {
        context: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// No pool exists (or the router reverted) for this pair on this venue.
    /// A negative result, not a fault.
    #[error("no liquidity for {pair} on {venue}")]
    NoLiquidity { venue: String, pair: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("signing key not configured, running read-only")]
    SigningUnavailable,

    #[error("transaction submission failed: {0}")]
    Submission(String),
}

impl BotError {
    pub fn rpc(context: impl Into<String>) -> Self {
        BotError::Rpc {
            context: context.into(),
            source: None,
        }
    }

    pub fn rpc_with(context: impl Into<String>, source: anyhow::Error) -> Self {
        BotError::Rpc {
            context: context.into(),
            source: Some(source),
        }
    }

    /// True for failures that are safe to absorb per-leg during a scan.
    pub fn is_transient(&self) -> bool {
        matches!(self, BotError::Rpc { .. } | BotError::NoLiquidity { .. })
    }
}

pub type BotResult<T> = Result<T, BotError>;
