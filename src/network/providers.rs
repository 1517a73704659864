//! Provider setup and the swappable RPC handle

use alloy::providers::{Provider, ProviderBuilder};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};
use crate::{
    config::ChainSettings,
    errors::{BotError, BotResult},
    network::retry::{retry_with_backoff, RetryConfig},
    ConcreteProvider,
};

/// Shared handle to the active provider. The orchestrator swaps the inner
/// provider on reconnect; venue adapters keep their decimals caches across
/// the swap.
#[derive(Clone)]
pub struct RpcHandle {
    inner: Arc<RwLock<Arc<ConcreteProvider>>>,
}

impl RpcHandle {
    pub fn new(provider: Arc<ConcreteProvider>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(provider)),
        }
    }

    pub async fn provider(&self) -> Arc<ConcreteProvider> {
        self.inner.read().await.clone()
    }

    pub async fn replace(&self, provider: Arc<ConcreteProvider>) {
        *self.inner.write().await = provider;
    }
}

/// Walk the configured endpoints in order and return the first that answers
/// a liveness check. All endpoints failing is fatal for the caller at
/// startup; during a run the orchestrator treats it as a degraded tick.
pub async fn connect(
    chain: &ChainSettings,
    call_timeout: Duration,
) -> BotResult<Arc<ConcreteProvider>> {
    for rpc_url in &chain.rpc_urls {
        match try_endpoint(rpc_url, chain, call_timeout).await {
            Ok(provider) => return Ok(provider),
            Err(e) => {
                warn!("⚠️ Failed to connect to {}: {}", rpc_url, e);
            }
        }
    }

    Err(BotError::rpc(format!(
        "no RPC endpoint reachable out of {} configured",
        chain.rpc_urls.len()
    )))
}

async fn try_endpoint(
    rpc_url: &str,
    chain: &ChainSettings,
    call_timeout: Duration,
) -> BotResult<Arc<ConcreteProvider>> {
    let url = rpc_url
        .parse()
        .map_err(|e| BotError::Config(format!("invalid RPC URL {}: {}", rpc_url, e)))?;

    let provider: Arc<ConcreteProvider> = Arc::new(ProviderBuilder::new().on_http(url).boxed());

    let block = retry_with_backoff(
        || async {
            tokio::time::timeout(call_timeout, provider.get_block_number())
                .await
                .context("liveness check timed out")?
                .context("failed to get block number")
        },
        &RetryConfig {
            max_attempts: 2,
            initial_delay_ms: 250,
            ..Default::default()
        },
        &format!("liveness check for {}", rpc_url),
    )
    .await?;

    info!("✅ Connected to {} at block {}", rpc_url, block);

    match tokio::time::timeout(call_timeout, provider.get_chain_id()).await {
        Ok(Ok(chain_id)) if chain_id != chain.chain_id => {
            warn!(
                "⚠️ {} reports chain id {} but config expects {}",
                rpc_url, chain_id, chain.chain_id
            );
        }
        Ok(Ok(chain_id)) => info!("   Chain ID: {}", chain_id),
        _ => warn!("⚠️ Could not read chain id from {}", rpc_url),
    }

    Ok(provider)
}
