//! CoreDAO Arbitrage Bot - On-chain arbitrage scanner for CoreDAO DEXes
//!
//! This bot quotes Uniswap-V2-style DEXes on CoreDAO, enumerates triangular
//! and cross-venue price discrepancies, and decides per opportunity whether
//! to execute, simulate, or skip. Without a funded signing key it is purely
//! observational.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod venue;
pub mod scanner;
pub mod decision;
pub mod submission;
pub mod orchestrator;
pub mod utils;
pub mod storage;

// Re-export commonly used items
pub use config::Config;
pub use errors::{BotError, BotResult};
pub use types::*;

// Type alias for our concrete provider
pub type ConcreteProvider = alloy::providers::RootProvider<alloy::transports::BoxTransport>;
