// Coinbase Exchange REST adapter: GET /products/BTC-USD/book?level=2

use serde_json::Value;
use tracing::trace;

use super::coinbase_types::CoinbaseLevel;
use super::{get_json, VenueAdapter};
use crate::engine::types::PriceLevel;
use crate::error::{MalformedEntry, SourceFormatError, UnavailableReason};
use crate::market_data::external_book::OrderBook;
use crate::market_data::normaliser::{side_entries, Normaliser};

pub const NAME: &str = "coinbase";
pub const DEFAULT_URL: &str = "https://api.exchange.coinbase.com/products/BTC-USD/book?level=2";

pub struct CoinbaseAdapter {
    client: reqwest::Client,
    pub book_url: String,
}

impl CoinbaseAdapter {
    /// `client` must send a User-Agent; the venue refuses anonymous requests.
    pub fn new(client: reqwest::Client, book_url: impl Into<String>) -> Self {
        Self { client, book_url: book_url.into() }
    }
}

#[async_trait::async_trait]
impl VenueAdapter for CoinbaseAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_raw(&self) -> Result<Value, UnavailableReason> {
        get_json(&self.client, &self.book_url).await
    }

    fn normalize(&self, raw: &Value) -> Result<OrderBook, SourceFormatError> {
        let bid_entries = side_entries(raw, "bids")?;
        let ask_entries = side_entries(raw, "asks")?;
        if let Some(seq) = raw.get("sequence") {
            trace!(venue = NAME, %seq, "Book sequence");
        }

        let extract = |entry: &Value| -> Result<PriceLevel, MalformedEntry> {
            CoinbaseLevel::from_entry(entry)?.to_level()
        };
        let mut norm = Normaliser::new(NAME);
        let bids = norm.side("bids", bid_entries, extract);
        let asks = norm.side("asks", ask_entries, extract);
        norm.finish(bids, asks)
    }
}
