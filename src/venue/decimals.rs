//! Per-venue token decimals cache

use alloy::primitives::Address;
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::RwLock;
use tracing::warn;
use crate::config::DEFAULT_TOKEN_DECIMALS;

/// Read-mostly cache of ERC-20 `decimals()` results. Values are immutable
/// for the process lifetime once cached. Two racing first-resolutions may
/// both load; either insert wins since the on-chain value is invariant.
///
/// A failed read falls back to [`DEFAULT_TOKEN_DECIMALS`] without caching,
/// so a transient RPC fault cannot freeze a wrong precision.
pub struct DecimalsCache {
    map: RwLock<HashMap<Address, u8>>,
}

impl DecimalsCache {
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get_or_load<F, Fut>(&self, token: Address, load: F) -> u8
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<u8>>,
    {
        if let Some(cached) = self.map.read().await.get(&token).copied() {
            return cached;
        }

        match load().await {
            Ok(decimals) => {
                self.map.write().await.insert(token, decimals);
                decimals
            }
            Err(e) => {
                warn!(
                    "failed to read decimals for {}, assuming {}: {}",
                    token, DEFAULT_TOKEN_DECIMALS, e
                );
                DEFAULT_TOKEN_DECIMALS
            }
        }
    }
}

impl Default for DecimalsCache {
    fn default() -> Self {
        Self::new()
    }
}
