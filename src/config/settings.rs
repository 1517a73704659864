//! Bot configuration loading and validation
//!
//! All settings come from a TOML file (`config/coredao.toml` by default,
//! overridable via `CONFIG_PATH`); the optional signing key comes from the
//! `PRIVATE_KEY` environment variable. Loaded values are passed explicitly
//! into each component constructor.

use alloy::primitives::Address;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;
use tracing::warn;
use crate::errors::{BotError, BotResult};

pub const DEFAULT_CONFIG_PATH: &str = "config/coredao.toml";

/// Fallback decimal precision when an ERC-20 `decimals()` read fails.
/// Display-only for scoring; no funds move based on it.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub chain: ChainSettings,
    /// Symbol → address map. The zero address marks a token as not yet
    /// verified; it is excluded from all scanning.
    pub tokens: BTreeMap<String, String>,
    pub venues: Vec<VenueSettings>,
    pub risk: RiskSettings,
    pub arbitrage: ArbitrageSettings,
    pub monitoring: MonitoringSettings,
    #[serde(default)]
    pub scan: ScanSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainSettings {
    /// Ordered list of RPC endpoints, tried in sequence at connect time.
    pub rpc_urls: Vec<String>,
    pub chain_id: u64,
    pub native_symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueSettings {
    pub name: String,
    pub router: Address,
    pub factory: Address,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskSettings {
    /// Gas units assumed per arbitrage transaction for cost estimation.
    pub gas_limit_per_tx: u64,
    /// Conservative gas price used for cost estimates when no live read is
    /// available. Never justifies an execution on its own.
    #[serde(default = "default_fallback_gas_price_gwei")]
    pub fallback_gas_price_gwei: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArbitrageSettings {
    /// Profitability floor as a fraction (0.003 = 0.3%).
    pub min_profit_threshold: f64,
    /// Reporting floor as a fraction; discrepancies below it are invisible.
    /// Must be strictly lower than `min_profit_threshold`.
    #[serde(default = "default_report_floor")]
    pub report_floor: f64,
}

impl ArbitrageSettings {
    pub fn profit_floor_pct(&self) -> f64 {
        self.min_profit_threshold * 100.0
    }

    pub fn report_floor_pct(&self) -> f64 {
        self.report_floor * 100.0
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringSettings {
    /// Seconds between scan tick starts.
    pub scan_interval_secs: u64,
    #[serde(default = "default_summary_every_ticks")]
    pub summary_every_ticks: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanSettings {
    /// Max concurrent quote calls within one tick. Legs of one cycle are
    /// always sequential regardless of this value.
    #[serde(default = "default_fan_out")]
    pub fan_out: usize,
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
    #[serde(default = "default_tick_deadline_secs")]
    pub tick_deadline_secs: u64,
    /// Floor on the gap between the end of one tick and the start of the
    /// next; a slow tick never compresses the following one below this.
    #[serde(default = "default_min_tick_gap_secs")]
    pub min_tick_gap_secs: u64,
    /// Fixed pause after a failed or fully-degraded tick.
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            fan_out: default_fan_out(),
            call_timeout_secs: default_call_timeout_secs(),
            tick_deadline_secs: default_tick_deadline_secs(),
            min_tick_gap_secs: default_min_tick_gap_secs(),
            error_backoff_secs: default_error_backoff_secs(),
        }
    }
}

fn default_fallback_gas_price_gwei() -> u64 {
    30
}

fn default_report_floor() -> f64 {
    0.001
}

fn default_summary_every_ticks() -> u64 {
    10
}

fn default_fan_out() -> usize {
    4
}

fn default_call_timeout_secs() -> u64 {
    5
}

fn default_tick_deadline_secs() -> u64 {
    45
}

fn default_min_tick_gap_secs() -> u64 {
    5
}

fn default_error_backoff_secs() -> u64 {
    10
}

impl Config {
    pub fn load(path: &str) -> BotResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| BotError::Config(format!("cannot read {}: {}", path, e)))?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> BotResult<Self> {
        let config: Config = toml::from_str(raw)
            .map_err(|e| BotError::Config(format!("malformed config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> BotResult<()> {
        if self.chain.rpc_urls.is_empty() {
            return Err(BotError::Config("chain.rpc_urls must not be empty".to_string()));
        }
        if self.venues.is_empty() {
            return Err(BotError::Config("at least one venue is required".to_string()));
        }
        if self.arbitrage.min_profit_threshold <= 0.0 {
            return Err(BotError::Config(
                "arbitrage.min_profit_threshold must be positive".to_string(),
            ));
        }
        if self.arbitrage.report_floor >= self.arbitrage.min_profit_threshold {
            return Err(BotError::Config(format!(
                "arbitrage.report_floor ({}) must be strictly below min_profit_threshold ({})",
                self.arbitrage.report_floor, self.arbitrage.min_profit_threshold
            )));
        }
        if self.monitoring.scan_interval_secs == 0 {
            return Err(BotError::Config(
                "monitoring.scan_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.scan.fan_out == 0 {
            return Err(BotError::Config("scan.fan_out must be at least 1".to_string()));
        }
        if self.risk.gas_limit_per_tx == 0 {
            return Err(BotError::Config("risk.gas_limit_per_tx must be positive".to_string()));
        }
        // Addresses must parse even for tokens we end up excluding
        for (symbol, address) in &self.tokens {
            Address::from_str(address).map_err(|e| {
                BotError::Config(format!("token {} has a malformed address: {}", symbol, e))
            })?;
        }
        Ok(())
    }

    /// Verified tokens only: entries with the zero address are excluded
    /// from all scanning, with a log line so the omission is visible.
    pub fn token_universe(&self) -> Vec<(String, Address)> {
        let mut universe = Vec::new();
        for (symbol, address) in &self.tokens {
            // validate() already guaranteed these parse
            let address = Address::from_str(address).unwrap_or(Address::ZERO);
            if address == Address::ZERO {
                warn!("token {} has no verified address, excluded from scanning", symbol);
                continue;
            }
            universe.push((symbol.clone(), address));
        }
        universe
    }
}

/// Optional signing credential. Absence means read-only mode.
pub fn signing_key_from_env() -> Option<String> {
    env::var("PRIVATE_KEY").ok().filter(|k| !k.trim().is_empty())
}
