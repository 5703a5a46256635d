// Convert wire values into exact decimals and validated levels.
// A bad level is skipped and counted; only a payload with nothing usable fails.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use crate::engine::types::PriceLevel;
use crate::error::{MalformedEntry, SourceFormatError};
use crate::market_data::external_book::OrderBook;

/// Parse a decimal from its textual form. Plain and scientific notation are accepted.
///
/// Text carrying more digits than a `Decimal` holds is rejected rather than rounded.
pub fn parse_decimal_str(field: &'static str, s: &str) -> Result<Decimal, MalformedEntry> {
    let trimmed = s.trim();
    let not_decimal = || MalformedEntry::NotDecimal { field, value: s.to_string() };
    if trimmed.is_empty() {
        return Err(not_decimal());
    }
    match trimmed.split_once(['e', 'E']) {
        Some((mantissa, _)) => {
            Decimal::from_str_exact(mantissa).map_err(|_| not_decimal())?;
            Decimal::from_scientific(trimmed).map_err(|_| not_decimal())
        }
        None => Decimal::from_str_exact(trimmed).map_err(|_| not_decimal()),
    }
}

/// Parse a decimal from a JSON string or number.
///
/// Numbers are read from their JSON text (serde_json is built with
/// `arbitrary_precision`), so no binary float ever sits in between.
pub fn parse_decimal(field: &'static str, v: &Value) -> Result<Decimal, MalformedEntry> {
    match v {
        Value::String(s) => parse_decimal_str(field, s),
        Value::Number(n) => parse_decimal_str(field, &n.to_string()),
        Value::Null => Err(MalformedEntry::MissingField(field)),
        other => Err(MalformedEntry::NotDecimal { field, value: other.to_string() }),
    }
}

pub fn parse_level(price: &Value, quantity: &Value) -> Result<PriceLevel, MalformedEntry> {
    let price = parse_decimal("price", price)?;
    let quantity = parse_decimal("quantity", quantity)?;
    PriceLevel::new(price, quantity)
}

/// Fetch `payload[side]` as an array, failing the whole payload if it is absent.
pub fn side_entries<'a>(payload: &'a Value, side: &'static str) -> Result<&'a [Value], SourceFormatError> {
    let obj = payload.as_object().ok_or(SourceFormatError::NotAnObject)?;
    obj.get(side)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or(SourceFormatError::MissingSide(side))
}

/// Per-venue normalisation pass. Tracks skipped entries across both sides.
pub struct Normaliser<'a> {
    venue: &'a str,
    skipped: usize,
}

impl<'a> Normaliser<'a> {
    pub fn new(venue: &'a str) -> Self {
        Self { venue, skipped: 0 }
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Run `extract` over every entry of one side, keeping the levels that parse.
    pub fn side<F>(&mut self, side: &'static str, entries: &[Value], extract: F) -> Vec<PriceLevel>
    where
        F: Fn(&Value) -> Result<PriceLevel, MalformedEntry>,
    {
        let mut levels = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match extract(entry) {
                Ok(level) => levels.push(level),
                Err(e) => {
                    self.skipped += 1;
                    warn!(venue = self.venue, side, index, error = %e, "Skipping malformed level");
                    metrics::counter!("lobx_malformed_levels_total", "venue" => self.venue.to_string())
                        .increment(1);
                }
            }
        }
        levels
    }

    /// Seal the pass into a book. An empty result is a payload failure.
    pub fn finish(self, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Result<OrderBook, SourceFormatError> {
        if bids.is_empty() && asks.is_empty() {
            return Err(SourceFormatError::NoValidLevels { skipped: self.skipped });
        }
        debug!(
            venue = self.venue,
            bids = bids.len(),
            asks = asks.len(),
            skipped = self.skipped,
            "Normalised book"
        );
        Ok(OrderBook::new(self.venue, bids, asks).with_skipped(self.skipped))
    }
}
