//! CoreDAO Arbitrage Bot - Main Entry Point

use core_arb_bot::*;
use alloy::signers::local::PrivateKeySigner;
use anyhow::Result;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use crate::{
    decision::DecisionEngine,
    network::{ChainGasOracle, RpcHandle},
    orchestrator::{Orchestrator, StatusHandle},
    scanner::ScanThresholds,
    submission::UnwiredSubmitter,
    venue::{survey_pools, DexVenue, QuoteSource},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging()?;
    utils::setup_output_directories()?;

    // Load configuration
    let config_path = std::env::var("CONFIG_PATH")
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)?;

    info!("🧊 CoreDAO Arbitrage Bot v0.5.0");
    info!("📋 Configuration ({}):", config_path);
    info!("   Chain ID: {}", config.chain.chain_id);
    info!("   RPC endpoints: {}", config.chain.rpc_urls.len());
    info!("   Venues: {}", config.venues.iter().map(|v| v.name.as_str()).collect::<Vec<_>>().join(", "));
    info!("   Profit floor: {:.3}%", config.arbitrage.profit_floor_pct());
    info!("   Report floor: {:.3}%", config.arbitrage.report_floor_pct());
    info!("   Scan interval: {}s", config.monitoring.scan_interval_secs);
    info!("   Quote fan-out: {}", config.scan.fan_out);

    // Optional signing credential decides the access mode
    let mode = match config::signing_key_from_env() {
        Some(key) => {
            let signer = PrivateKeySigner::from_str(&key)
                .map_err(|e| anyhow::anyhow!("PRIVATE_KEY is set but invalid: {}", e))?;
            info!("🔑 Bot wallet: {}", signer.address());
            AccessMode::Funded
        }
        None => {
            warn!("No private key - running in READ-ONLY mode");
            warn!("Bot will find opportunities but NOT execute trades");
            AccessMode::ReadOnly
        }
    };

    let call_timeout = Duration::from_secs(config.scan.call_timeout_secs);
    let status = StatusHandle::new();

    // First connection is the one fatal path: nothing works without a chain
    status.set_connection(ConnectionState::Connecting).await;
    let provider = network::connect(&config.chain, call_timeout).await?;
    let rpc = RpcHandle::new(provider);
    status.set_connection(ConnectionState::Connected(mode)).await;

    // Venue adapters
    let dex_venues: Vec<Arc<DexVenue>> = config
        .venues
        .iter()
        .map(|settings| Arc::new(DexVenue::new(settings, rpc.clone(), call_timeout)))
        .collect();

    // Resolve the verified token universe through the primary venue
    let primary = dex_venues
        .first()
        .expect("config validation guarantees at least one venue")
        .clone();
    let mut universe = Vec::new();
    for (symbol, address) in config.token_universe() {
        let token = primary.resolve_token(&symbol, address).await;
        info!("   Token {} @ {} ({} decimals)", token.symbol, token.address, token.decimals);
        universe.push(token);
    }

    if universe.len() < 3 && dex_venues.len() < 2 {
        warn!(
            "Only {} verified tokens on a single venue: nothing can be scanned until more are verified",
            universe.len()
        );
    }

    info!("\n🔍 Surveying pools...");
    for venue in &dex_venues {
        survey_pools(venue, &universe).await;
    }

    // Decision engine and orchestrator
    let gas_oracle = Arc::new(ChainGasOracle::new(rpc.clone(), call_timeout));
    let engine = DecisionEngine::new(mode, gas_oracle, Arc::new(UnwiredSubmitter), &config.risk);

    let venues: Vec<Arc<dyn QuoteSource>> = dex_venues
        .iter()
        .map(|v| v.clone() as Arc<dyn QuoteSource>)
        .collect();

    let mut orchestrator = Orchestrator::new(
        venues,
        universe,
        engine,
        ScanThresholds::from(&config.arbitrage),
        config.monitoring.clone(),
        config.scan.clone(),
        status.clone(),
        true,
    )
    .with_reconnect(config.chain.clone(), rpc.clone());

    // Setup shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("\n📛 Received shutdown signal (Ctrl+C)...");
            let _ = shutdown_tx.send(());
        }
    });

    orchestrator.run(shutdown_rx).await;

    // Final statistics
    info!("\n🛑 Shutting down gracefully...");
    utils::print_summary(
        orchestrator.stats(),
        orchestrator.ledger().len(),
        orchestrator.uptime_secs(),
    );

    Ok(())
}
