//! Shared read-only status surface
//!
//! The orchestrator is the only writer; outside readers (a status endpoint,
//! the rebalancing layer) get cloned snapshots and never reference live
//! mutable state.

use std::sync::Arc;
use tokio::sync::RwLock;
use crate::types::{ConnectionState, Opportunity, ScanStats};

#[derive(Debug)]
struct StatusInner {
    connection: ConnectionState,
    latest_opportunities: Vec<Opportunity>,
    stats: ScanStats,
}

#[derive(Clone)]
pub struct StatusHandle {
    inner: Arc<RwLock<StatusInner>>,
}

impl StatusHandle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StatusInner {
                connection: ConnectionState::Disconnected,
                latest_opportunities: Vec::new(),
                stats: ScanStats::default(),
            })),
        }
    }

    /// Most recent tick's opportunities in discovery order.
    pub async fn latest_opportunities(&self) -> Vec<Opportunity> {
        self.inner.read().await.latest_opportunities.clone()
    }

    pub async fn stats(&self) -> ScanStats {
        self.inner.read().await.stats.clone()
    }

    pub async fn connection(&self) -> ConnectionState {
        self.inner.read().await.connection
    }

    pub(crate) async fn publish_tick(&self, opportunities: Vec<Opportunity>, stats: ScanStats) {
        let mut inner = self.inner.write().await;
        inner.latest_opportunities = opportunities;
        inner.stats = stats;
    }

    pub async fn set_connection(&self, state: ConnectionState) {
        self.inner.write().await.connection = state;
    }
}

impl Default for StatusHandle {
    fn default() -> Self {
        Self::new()
    }
}
