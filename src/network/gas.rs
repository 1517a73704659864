//! Network gas price lookup and cost estimation

use alloy::primitives::U256;
use alloy::providers::Provider;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use crate::{
    errors::{BotError, BotResult},
    network::providers::RpcHandle,
    utils::math::decimal_from_raw,
};

pub const GWEI_IN_WEI: u128 = 1_000_000_000;
const NATIVE_DECIMALS: u8 = 18;

/// Seam for the current network gas price, in wei.
#[async_trait]
pub trait GasOracle: Send + Sync {
    async fn gas_price(&self) -> BotResult<u128>;
}

pub struct ChainGasOracle {
    rpc: RpcHandle,
    call_timeout: Duration,
}

impl ChainGasOracle {
    pub fn new(rpc: RpcHandle, call_timeout: Duration) -> Self {
        Self { rpc, call_timeout }
    }
}

#[async_trait]
impl GasOracle for ChainGasOracle {
    async fn gas_price(&self) -> BotResult<u128> {
        let provider = self.rpc.provider().await;
        tokio::time::timeout(self.call_timeout, provider.get_gas_price())
            .await
            .map_err(|_| BotError::rpc("gas price lookup timed out"))?
            .map_err(|e| BotError::rpc_with("gas price lookup failed", e.into()))
    }
}

/// Transaction cost in the native gas-paying asset.
pub fn cost_in_native(gas_price_wei: u128, gas_limit: u64) -> Decimal {
    let wei = U256::from(gas_price_wei).saturating_mul(U256::from(gas_limit));
    decimal_from_raw(wei, NATIVE_DECIMALS).unwrap_or(Decimal::MAX)
}

#[cfg(test)]
pub(crate) mod mocks {
    use super::*;

    pub struct FixedGas(pub u128);

    #[async_trait]
    impl GasOracle for FixedGas {
        async fn gas_price(&self) -> BotResult<u128> {
            Ok(self.0)
        }
    }

    pub struct FailingGas;

    #[async_trait]
    impl GasOracle for FailingGas {
        async fn gas_price(&self) -> BotResult<u128> {
            Err(BotError::rpc("gas price lookup timed out"))
        }
    }
}
