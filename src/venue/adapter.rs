//! On-chain DEX venue adapter
//!
//! Translates token pairs into factory/pair/router reads and back into
//! decimal-correct amounts. Every call here is a read-only `eth_call`, so a
//! failure can never corrupt state and is always safe to skip or retry.

use alloy::{
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::debug;
use crate::{
    config::VenueSettings,
    errors::{BotError, BotResult},
    network::providers::RpcHandle,
    types::{pair_label, Quote, TokenRef},
    utils::math::{decimal_from_raw, to_raw_units},
    venue::{codec, decimals::DecimalsCache, source::QuoteSource},
};

pub struct DexVenue {
    name: String,
    router: Address,
    factory: Address,
    rpc: RpcHandle,
    call_timeout: Duration,
    decimals: DecimalsCache,
}

impl DexVenue {
    pub fn new(settings: &VenueSettings, rpc: RpcHandle, call_timeout: Duration) -> Self {
        Self {
            name: settings.name.clone(),
            router: settings.router,
            factory: settings.factory,
            rpc,
            call_timeout,
            decimals: DecimalsCache::new(),
        }
    }

    async fn call(&self, to: Address, data: Vec<u8>, context: &str) -> BotResult<Bytes> {
        let provider = self.rpc.provider().await;
        let tx = TransactionRequest::default().to(to).input(data.into());

        let result = tokio::time::timeout(self.call_timeout, provider.call(&tx))
            .await
            .map_err(|_| BotError::rpc(format!("{} timed out on {}", context, self.name)))?;

        result.map_err(|e| BotError::rpc_with(format!("{} failed on {}", context, self.name), e.into()))
    }

    /// Factory lookup. `None` means no pool exists for this pair — a
    /// negative result the caller skips, not an error.
    pub async fn resolve_pair(&self, a: &TokenRef, b: &TokenRef) -> BotResult<Option<Address>> {
        let label = pair_label(a, b);
        let data = codec::encode_get_pair(a.address, b.address);
        let bytes = self.call(self.factory, data, &format!("getPair {}", label)).await?;

        let pair = codec::decode_pair_address(&bytes)
            .map_err(|e| BotError::rpc_with(format!("getPair {} on {}", label, self.name), e))?;

        if pair == Address::ZERO {
            debug!("no {} pool on {}", label, self.name);
            return Ok(None);
        }
        Ok(Some(pair))
    }

    pub async fn get_reserves(&self, pair: Address) -> BotResult<(U256, U256)> {
        let bytes = self
            .call(pair, codec::encode_get_reserves(), "getReserves")
            .await?;
        codec::decode_reserves(&bytes)
            .map_err(|e| BotError::rpc_with(format!("getReserves {} on {}", pair, self.name), e))
    }

    /// Cached ERC-20 decimals. A failed first read falls back to 18 and is
    /// retried on the next use; decimals are display precision for scoring,
    /// not settlement-critical.
    pub async fn get_decimals(&self, token: Address) -> u8 {
        self.decimals
            .get_or_load(token, || async {
                let bytes = self
                    .call(token, codec::encode_decimals(), "decimals")
                    .await
                    .map_err(anyhow::Error::from)?;
                codec::decode_decimals(&bytes)
            })
            .await
    }

    pub async fn resolve_token(&self, symbol: &str, address: Address) -> TokenRef {
        let decimals = self.get_decimals(address).await;
        TokenRef::new(symbol, address, decimals)
    }

    /// A router revert on a quote path means the pool is missing or empty,
    /// not that the node misbehaved.
    fn classify_quote_error(&self, err: BotError, label: &str) -> BotError {
        if let BotError::Rpc { ref context, ref source } = err {
            let text = match source {
                Some(src) => format!("{} {:#}", context, src).to_lowercase(),
                None => context.to_lowercase(),
            };
            if text.contains("revert") {
                return BotError::NoLiquidity {
                    venue: self.name.clone(),
                    pair: label.to_string(),
                };
            }
        }
        err
    }
}

#[async_trait]
impl QuoteSource for DexVenue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn quote(
        &self,
        token_in: &TokenRef,
        token_out: &TokenRef,
        amount_in: Decimal,
    ) -> BotResult<Quote> {
        let label = pair_label(token_in, token_out);

        let raw_in = to_raw_units(amount_in, token_in.decimals)
            .ok_or_else(|| BotError::rpc(format!("amount {} does not fit raw units", amount_in)))?;
        if raw_in == U256::ZERO {
            // Dust input: the router would revert on zero anyway
            return Err(BotError::NoLiquidity {
                venue: self.name.clone(),
                pair: label,
            });
        }

        let data = codec::encode_get_amounts_out(raw_in, &[token_in.address, token_out.address]);
        let bytes = self
            .call(self.router, data, &format!("getAmountsOut {}", label))
            .await
            .map_err(|e| self.classify_quote_error(e, &label))?;

        let amounts = codec::decode_amounts(&bytes)
            .map_err(|e| BotError::rpc_with(format!("getAmountsOut {} on {}", label, self.name), e))?;
        let raw_out = amounts
            .last()
            .copied()
            .ok_or_else(|| BotError::rpc(format!("empty amounts for {} on {}", label, self.name)))?;

        if raw_out == U256::ZERO {
            return Err(BotError::NoLiquidity {
                venue: self.name.clone(),
                pair: label,
            });
        }

        let amount_out = decimal_from_raw(raw_out, token_out.decimals)
            .ok_or_else(|| BotError::rpc(format!("amount out overflow for {}", label)))?;

        Ok(Quote::new(
            self.name.clone(),
            token_in.clone(),
            token_out.clone(),
            amount_in,
            amount_out,
        ))
    }
}
