pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod market_data;
pub mod report;
pub mod telemetry;

/// Asset every venue adapter quotes against USD.
pub const ASSET: &str = "BTC";
