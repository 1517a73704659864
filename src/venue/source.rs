//! Quote source seam consumed by the scanner

use async_trait::async_trait;
use rust_decimal::Decimal;
use crate::{
    errors::BotResult,
    types::{Quote, TokenRef},
};

/// "How much `token_out` do I get for `amount_in` of `token_in`?"
///
/// Implemented by [`crate::venue::DexVenue`] over on-chain router calls and
/// by mocks in tests. Every call is a read-only observation; failures are
/// always safe to absorb.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    fn name(&self) -> &str;

    async fn quote(
        &self,
        token_in: &TokenRef,
        token_out: &TokenRef,
        amount_in: Decimal,
    ) -> BotResult<Quote>;
}
