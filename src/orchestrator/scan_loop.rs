//! The scan → detect → decide → record loop
//!
//! Single tick driver: ticks never overlap, a slow tick never compresses
//! the next below the configured gap, and nothing a tick does can take the
//! loop down. Total RPC failure inside a tick degrades to "no opportunities"
//! and a fixed backoff before endpoint selection is retried; only startup
//! treats a dead chain as fatal.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};
use crate::{
    config::{ChainSettings, MonitoringSettings, ScanSettings},
    decision::DecisionEngine,
    network::{self, RpcHandle},
    orchestrator::StatusHandle,
    scanner::{run_scan, ScanThresholds, TickReport},
    storage,
    types::{ConnectionState, ExecutionResult, Opportunity, ScanStats, TokenRef},
    utils::display,
    venue::QuoteSource,
};

pub struct Orchestrator {
    venues: Vec<Arc<dyn QuoteSource>>,
    universe: Vec<TokenRef>,
    engine: DecisionEngine,
    thresholds: ScanThresholds,
    monitoring: MonitoringSettings,
    scan: ScanSettings,
    /// Endpoint list + swappable provider, for mid-run reconnects. Absent
    /// when the venues are not chain-backed (tests).
    reconnect: Option<(ChainSettings, RpcHandle)>,
    /// Append-only trade ledger; single writer, never pruned during a run.
    ledger: Vec<ExecutionResult>,
    stats: ScanStats,
    status: StatusHandle,
    started_at: Instant,
    persist_observations: bool,
}

impl Orchestrator {
    pub fn new(
        venues: Vec<Arc<dyn QuoteSource>>,
        universe: Vec<TokenRef>,
        engine: DecisionEngine,
        thresholds: ScanThresholds,
        monitoring: MonitoringSettings,
        scan: ScanSettings,
        status: StatusHandle,
        persist_observations: bool,
    ) -> Self {
        Self {
            venues,
            universe,
            engine,
            thresholds,
            monitoring,
            scan,
            reconnect: None,
            ledger: Vec::new(),
            stats: ScanStats::default(),
            status,
            started_at: Instant::now(),
            persist_observations,
        }
    }

    pub fn with_reconnect(mut self, chain: ChainSettings, rpc: RpcHandle) -> Self {
        self.reconnect = Some((chain, rpc));
        self
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub fn ledger(&self) -> &[ExecutionResult] {
        &self.ledger
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Run until the shutdown signal fires.
    pub async fn run(&mut self, mut shutdown: oneshot::Receiver<()>) {
        let mut interval =
            tokio::time::interval(Duration::from_secs(self.monitoring.scan_interval_secs));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let min_gap = Duration::from_secs(self.scan.min_tick_gap_secs);
        let backoff = Duration::from_secs(self.scan.error_backoff_secs);
        let mut last_tick_end: Option<Instant> = None;

        info!("\n🚀 Starting scan loop (every {}s)...\n", self.monitoring.scan_interval_secs);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Some(end) = last_tick_end {
                        let since = end.elapsed();
                        if since < min_gap {
                            tokio::time::sleep(min_gap - since).await;
                        }
                    }

                    match self.tick().await {
                        Ok(false) => {}
                        Ok(true) => {
                            warn!("⚡ every quote failed at the RPC layer, backing off {}s", backoff.as_secs());
                            self.status.set_connection(ConnectionState::Disconnected).await;
                            tokio::time::sleep(backoff).await;
                            self.try_reconnect().await;
                        }
                        Err(e) => {
                            error!("Scan tick error: {}", e);
                            tokio::time::sleep(backoff).await;
                        }
                    }

                    last_tick_end = Some(Instant::now());
                }
                _ = &mut shutdown => {
                    info!("Shutdown signal received, exiting scan loop...");
                    break;
                }
            }
        }
    }

    /// One scan tick. Returns whether the tick was fully degraded (every
    /// quote failed at the RPC layer).
    pub async fn tick(&mut self) -> anyhow::Result<bool> {
        self.stats.record_tick();
        info!("🔍 Scan #{}", self.stats.scan_count);

        let deadline = Duration::from_secs(self.scan.tick_deadline_secs);
        let report = match tokio::time::timeout(
            deadline,
            run_scan(&self.venues, &self.universe, self.thresholds, self.scan.fan_out),
        )
        .await
        {
            Ok(report) => report,
            Err(_) => {
                // Outstanding quotes are abandoned with the scan future;
                // the partial tick reports nothing
                warn!(
                    "⏱️ Scan #{} exceeded its {}s deadline, discarding partial results",
                    self.stats.scan_count,
                    deadline.as_secs()
                );
                TickReport::default()
            }
        };

        let degraded = report.fully_degraded();
        self.stats.record_opportunities(report.opportunities.len());

        if report.opportunities.is_empty() {
            info!(
                "No opportunities this scan ({} quotes ok, {} no-liquidity, {} rpc failures)",
                report.quotes_ok, report.no_liquidity, report.rpc_failures
            );
        } else {
            info!("✅ Found {} opportunities", report.opportunities.len());
        }

        let mut latest: Vec<Opportunity> = Vec::with_capacity(report.opportunities.len());
        for opportunity in report.opportunities {
            display::print_opportunity(&opportunity);
            if self.persist_observations {
                if let Err(e) = storage::save_opportunity(&opportunity) {
                    error!("Failed to save opportunity: {}", e);
                }
            }

            let result = self.engine.decide(opportunity.clone()).await;
            self.stats.record_result(&result);
            display::print_execution_result(&result);
            if self.persist_observations {
                if let Err(e) = storage::save_execution(&result) {
                    error!("Failed to save execution result: {}", e);
                }
            }
            self.ledger.push(result);
            latest.push(opportunity);
        }

        self.status.publish_tick(latest, self.stats.clone()).await;

        if self.monitoring.summary_every_ticks > 0
            && self.stats.scan_count % self.monitoring.summary_every_ticks == 0
        {
            display::print_summary(&self.stats, self.ledger.len(), self.uptime_secs());
        }

        Ok(degraded)
    }

    async fn try_reconnect(&mut self) {
        let Some((chain, rpc)) = &self.reconnect else {
            return;
        };

        self.status.set_connection(ConnectionState::Connecting).await;
        match network::connect(chain, Duration::from_secs(self.scan.call_timeout_secs)).await {
            Ok(provider) => {
                rpc.replace(provider).await;
                self.status
                    .set_connection(ConnectionState::Connected(self.engine.mode()))
                    .await;
                info!("🔗 Reconnected to chain");
            }
            Err(e) => {
                warn!("Reconnect failed, staying degraded: {}", e);
                self.status.set_connection(ConnectionState::Disconnected).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use crate::{
        network::gas::mocks::FailingGas,
        scanner::testing::{universe, DeadVenue, MockVenue},
        submission::UnwiredSubmitter,
        types::{AccessMode, ExecutionStatus},
    };

    fn read_only_engine() -> DecisionEngine {
        DecisionEngine::new(
            AccessMode::ReadOnly,
            Arc::new(FailingGas),
            Arc::new(UnwiredSubmitter),
            &crate::config::RiskSettings {
                gas_limit_per_tx: 250_000,
                fallback_gas_price_gwei: 30,
            },
        )
    }

    fn orchestrator(venues: Vec<Arc<dyn QuoteSource>>) -> Orchestrator {
        Orchestrator::new(
            venues,
            universe(&["WCORE", "ICE", "SCORE"]),
            read_only_engine(),
            ScanThresholds {
                report_floor_pct: 0.1,
                profit_floor_pct: 0.3,
            },
            MonitoringSettings {
                scan_interval_secs: 30,
                summary_every_ticks: 10,
            },
            ScanSettings::default(),
            StatusHandle::new(),
            false,
        )
    }

    #[tokio::test]
    async fn fully_failing_tick_still_completes_and_counts() {
        let mut orch = orchestrator(vec![Arc::new(DeadVenue("icecreamswap".to_string()))]);

        let degraded = orch.tick().await.unwrap();

        assert!(degraded);
        assert_eq!(orch.stats().scan_count, 1);
        assert_eq!(orch.stats().opportunities_found, 0);
        assert!(orch.ledger().is_empty());
    }

    #[tokio::test]
    async fn profitable_cycle_flows_into_ledger_and_status() {
        let venue = Arc::new(MockVenue::new(
            "icecreamswap",
            &[
                ("WCORE", "ICE", dec!(2.0)),
                ("ICE", "SCORE", dec!(2.0)),
                ("SCORE", "WCORE", dec!(0.3)),
            ],
        ));
        let mut orch = orchestrator(vec![venue]);
        let status = orch.status.clone();

        let degraded = orch.tick().await.unwrap();

        assert!(!degraded);
        assert_eq!(orch.stats().opportunities_found, 1);
        assert_eq!(orch.ledger().len(), 1);
        // Read-only mode: profitable terminates at Simulated
        assert_eq!(orch.ledger()[0].status, ExecutionStatus::Simulated);

        let latest = status.latest_opportunities().await;
        assert_eq!(latest.len(), 1);
        assert!((latest[0].profit_pct - 20.0).abs() < 1e-9);
        assert_eq!(status.stats().await.scan_count, 1);
    }

    #[tokio::test]
    async fn stale_opportunities_are_replaced_each_tick() {
        let venue = Arc::new(MockVenue::new(
            "icecreamswap",
            &[
                ("WCORE", "ICE", dec!(2.0)),
                ("ICE", "SCORE", dec!(2.0)),
                ("SCORE", "WCORE", dec!(0.3)),
            ],
        ));
        let dead: Arc<dyn QuoteSource> = Arc::new(DeadVenue("icecreamswap".to_string()));

        let mut orch = orchestrator(vec![venue]);
        let status = orch.status.clone();
        orch.tick().await.unwrap();
        assert_eq!(status.latest_opportunities().await.len(), 1);

        // Second tick finds nothing; the published list must empty out
        orch.venues = vec![dead];
        orch.tick().await.unwrap();
        assert!(status.latest_opportunities().await.is_empty());
        assert_eq!(status.stats().await.scan_count, 2);
    }
}
