//! On-chain quote observations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use super::TokenRef;

/// A point-in-time "amounts-out" observation from one venue.
///
/// `amount_out` is expressed in `token_out`'s resolved decimal precision;
/// never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub venue: String,
    pub token_in: TokenRef,
    pub token_out: TokenRef,
    pub amount_in: Decimal,
    pub amount_out: Decimal,
    pub fetched_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(
        venue: impl Into<String>,
        token_in: TokenRef,
        token_out: TokenRef,
        amount_in: Decimal,
        amount_out: Decimal,
    ) -> Self {
        Self {
            venue: venue.into(),
            token_in,
            token_out,
            amount_in,
            amount_out,
            fetched_at: Utc::now(),
        }
    }
}
