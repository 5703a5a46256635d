// Source: https://docs.gemini.com/rest-api/#current-order-book
// { "bids": [{"price": "3607.85", "amount": "6.643373", "timestamp": "1547147541"}], "asks": [...] }

use serde::Deserialize;
use serde_json::Value;

use crate::engine::types::PriceLevel;
use crate::error::MalformedEntry;
use crate::market_data::normaliser::parse_decimal;

// Absent fields land as None; `timestamp` and any other extras are ignored.
#[derive(Debug, Deserialize)]
pub struct GeminiLevel {
    pub price: Option<Value>,
    pub amount: Option<Value>,
}

impl GeminiLevel {
    pub fn from_entry(entry: &Value) -> Result<Self, MalformedEntry> {
        // serde would happily read a positional array into this struct
        if !entry.is_object() {
            return Err(MalformedEntry::Shape(format!("expected object, got {}", entry)));
        }
        GeminiLevel::deserialize(entry).map_err(|e| MalformedEntry::Shape(e.to_string()))
    }

    pub fn to_level(&self) -> Result<PriceLevel, MalformedEntry> {
        let price = self.price.as_ref().ok_or(MalformedEntry::MissingField("price"))?;
        let amount = self.amount.as_ref().ok_or(MalformedEntry::MissingField("amount"))?;
        PriceLevel::new(parse_decimal("price", price)?, parse_decimal("amount", amount)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_entry_fields_and_extras() {
        let entry = json!({"price": "3607.85", "amount": "6.643373", "timestamp": "1547147541"});
        let level = GeminiLevel::from_entry(&entry).unwrap().to_level().unwrap();
        assert_eq!(level.price(), dec!(3607.85));
        assert_eq!(level.quantity(), dec!(6.643373));

        let no_price = GeminiLevel::from_entry(&json!({"amount": "1"})).unwrap();
        assert_eq!(no_price.to_level(), Err(MalformedEntry::MissingField("price")));
        let null_amount = GeminiLevel::from_entry(&json!({"price": "1", "amount": null})).unwrap();
        assert_eq!(null_amount.to_level(), Err(MalformedEntry::MissingField("amount")));
        assert!(matches!(GeminiLevel::from_entry(&json!(["1", "2"])), Err(MalformedEntry::Shape(_))));
    }
}
