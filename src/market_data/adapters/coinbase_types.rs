// Source: https://docs.cdp.coinbase.com/exchange/reference/exchangerestapi_getproductbook
// level=2: { "sequence": 1, "bids": [["price", "size", num_orders]], "asks": [...], "time": "..." }

use serde_json::Value;

use crate::engine::types::PriceLevel;
use crate::error::MalformedEntry;
use crate::market_data::normaliser::parse_decimal;

/// Positional level entry. Only the first two slots matter.
#[derive(Debug)]
pub struct CoinbaseLevel<'a> {
    pub price: &'a Value,
    pub size: &'a Value,
    pub num_orders: Option<&'a Value>,
}

impl<'a> CoinbaseLevel<'a> {
    pub fn from_entry(entry: &'a Value) -> Result<Self, MalformedEntry> {
        let slots = entry
            .as_array()
            .ok_or_else(|| MalformedEntry::Shape(format!("expected array, got {}", entry)))?;
        match slots.as_slice() {
            [price, size, rest @ ..] => Ok(Self { price, size, num_orders: rest.first() }),
            [_] => Err(MalformedEntry::MissingField("size")),
            [] => Err(MalformedEntry::MissingField("price")),
        }
    }

    pub fn to_level(&self) -> Result<PriceLevel, MalformedEntry> {
        PriceLevel::new(parse_decimal("price", self.price)?, parse_decimal("size", self.size)?)
    }
}
