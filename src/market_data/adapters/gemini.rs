// Gemini REST adapter: GET /v1/book/BTCUSD

use serde_json::Value;

use super::gemini_types::GeminiLevel;
use super::{get_json, VenueAdapter};
use crate::engine::types::PriceLevel;
use crate::error::{MalformedEntry, SourceFormatError, UnavailableReason};
use crate::market_data::external_book::OrderBook;
use crate::market_data::normaliser::{side_entries, Normaliser};

pub const NAME: &str = "gemini";
pub const DEFAULT_URL: &str = "https://api.gemini.com/v1/book/BTCUSD";

pub struct GeminiAdapter {
    client: reqwest::Client,
    pub book_url: String,
}

impl GeminiAdapter {
    pub fn new(client: reqwest::Client, book_url: impl Into<String>) -> Self {
        Self { client, book_url: book_url.into() }
    }
}

#[async_trait::async_trait]
impl VenueAdapter for GeminiAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_raw(&self) -> Result<Value, UnavailableReason> {
        get_json(&self.client, &self.book_url).await
    }

    fn normalize(&self, raw: &Value) -> Result<OrderBook, SourceFormatError> {
        let bid_entries = side_entries(raw, "bids")?;
        let ask_entries = side_entries(raw, "asks")?;

        let extract = |entry: &Value| -> Result<PriceLevel, MalformedEntry> {
            GeminiLevel::from_entry(entry)?.to_level()
        };
        let mut norm = Normaliser::new(NAME);
        let bids = norm.side("bids", bid_entries, extract);
        let asks = norm.side("asks", ask_entries, extract);
        norm.finish(bids, asks)
    }
}
