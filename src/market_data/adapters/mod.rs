// Shared trait + HTTP plumbing for venue adapters

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::{SourceFormatError, SourceUnavailable, UnavailableReason};
use crate::market_data::external_book::OrderBook;

#[async_trait::async_trait]
pub trait VenueAdapter: Send + Sync {
    /// Stable lowercase venue name, used in logs and errors.
    fn name(&self) -> &str;

    /// Pull the venue's raw order-book payload.
    async fn fetch_raw(&self) -> Result<Value, UnavailableReason>;

    /// Turn a raw payload into a book, skipping malformed levels individually.
    fn normalize(&self, raw: &Value) -> Result<OrderBook, SourceFormatError>;

    async fn fetch_book(&self) -> Result<OrderBook, SourceUnavailable> {
        let raw = self
            .fetch_raw()
            .await
            .map_err(|reason| SourceUnavailable::new(self.name(), reason))?;
        self.normalize(&raw)
            .map_err(|e| SourceUnavailable::new(self.name(), e))
    }
}

pub fn http_client(user_agent: &str, timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .gzip(true)
        .build()
}

// GET + status check + JSON decode. Every failure is a network failure for the caller.
pub(crate) async fn get_json(client: &reqwest::Client, url: &str) -> Result<Value, UnavailableReason> {
    debug!(url, "Requesting order book");
    let res = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| UnavailableReason::Network(e.to_string()))?;
    res.json::<Value>()
        .await
        .map_err(|e| UnavailableReason::Network(format!("response body: {}", e)))
}

pub mod coinbase;
pub mod coinbase_types;
pub mod gemini;
pub mod gemini_types;
