//! Token reference types

use alloy::primitives::Address;
use serde::Serialize;

/// A verified token with its on-chain decimal precision.
///
/// Decimals are resolved lazily by the venue adapter and cached for the
/// process lifetime; contracts are assumed not to change `decimals()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRef {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

impl TokenRef {
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }
}

impl std::fmt::Display for TokenRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Canonical "A/B" label for a token pair, used in logs and errors.
pub fn pair_label(a: &TokenRef, b: &TokenRef) -> String {
    format!("{}/{}", a.symbol, b.symbol)
}
