use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;

use crate::error::InvalidInput;
use crate::market_data::normaliser::parse_decimal_str;

/// BTC-USD order book aggregator: prices a market buy and sell across venues.
#[derive(Debug, Parser)]
#[command(name = "lobx-agg", version, about)]
pub struct Cli {
    /// Quantity of BTC to buy/sell
    #[arg(short, long, default_value = "10", allow_hyphen_values = true)]
    pub qty: String,

    /// Settings file (defaults to ./lobx.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Validate the requested quantity before anything touches the network.
pub fn parse_quantity(raw: &str) -> Result<Decimal, InvalidInput> {
    let qty = parse_decimal_str("qty", raw).map_err(|_| InvalidInput::Unparsable(raw.to_string()))?;
    if qty <= Decimal::ZERO {
        return Err(InvalidInput::NotPositive(raw.trim().to_string()));
    }
    Ok(qty)
}
