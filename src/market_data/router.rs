// Router orchestrates gates + adapters + aggregation + simulation for one run

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use rust_decimal::Decimal;
use tracing::{error, info, instrument};

use crate::config::Settings;
use crate::engine::execution::{simulate_buy, simulate_sell};
use crate::engine::types::ExecutionResult;
use crate::error::{AggError, AggResult, SourceUnavailable, UnavailableReason};
use crate::market_data::adapters::coinbase::CoinbaseAdapter;
use crate::market_data::adapters::gemini::GeminiAdapter;
use crate::market_data::adapters::{http_client, VenueAdapter};
use crate::market_data::external_book::OrderBook;
use crate::market_data::rate_gate::RateGate;
use crate::market_data::unified_book::{aggregate, AggregatedBook};

/// An adapter behind its own call-rate gate.
pub struct GatedSource {
    pub adapter: Arc<dyn VenueAdapter>,
    pub gate: RateGate,
}

impl GatedSource {
    pub fn new(adapter: Arc<dyn VenueAdapter>, min_interval: Duration) -> Self {
        Self { adapter, gate: RateGate::new(min_interval) }
    }

    pub fn name(&self) -> &str {
        self.adapter.name()
    }
}

/// Result of one run: both sides simulated against the same aggregated snapshot.
#[derive(Debug, Clone)]
pub struct MarketQuote {
    pub quantity: Decimal,
    pub buy: ExecutionResult,
    pub sell: ExecutionResult,
    pub book: AggregatedBook,
}

pub struct Orchestrator {
    sources: Vec<GatedSource>,
    fetch_timeout: Duration,
}

impl Orchestrator {
    pub fn new(sources: Vec<GatedSource>, fetch_timeout: Duration) -> AggResult<Self> {
        if sources.is_empty() {
            return Err(AggError::Config("no order-book sources configured".to_string()));
        }
        Ok(Self { sources, fetch_timeout })
    }

    /// Build the enabled venues from settings, sharing one HTTP client.
    pub fn from_settings(settings: &Settings) -> AggResult<Self> {
        let client = http_client(&settings.http.user_agent, settings.http.timeout())
            .map_err(|e| AggError::Config(format!("http client: {}", e)))?;

        let mut sources = Vec::new();
        let gemini = &settings.venues.gemini;
        if gemini.enabled {
            let adapter = GeminiAdapter::new(client.clone(), gemini.url.clone());
            sources.push(GatedSource::new(Arc::new(adapter), gemini.min_interval()));
        }
        let coinbase = &settings.venues.coinbase;
        if coinbase.enabled {
            let adapter = CoinbaseAdapter::new(client, coinbase.url.clone());
            sources.push(GatedSource::new(Arc::new(adapter), coinbase.min_interval()));
        }
        Self::new(sources, settings.http.timeout())
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(GatedSource::name).collect()
    }

    async fn fetch_one(&self, source: &GatedSource) -> Result<OrderBook, SourceUnavailable> {
        let venue = source.name();
        source
            .gate
            .try_acquire()
            .map_err(|reason| SourceUnavailable::new(venue, reason))?;

        match tokio::time::timeout(self.fetch_timeout, source.adapter.fetch_book()).await {
            Ok(result) => result,
            Err(_) => Err(SourceUnavailable::new(
                venue,
                UnavailableReason::Timeout(self.fetch_timeout),
            )),
        }
    }

    /// Fetch every source concurrently and wait for all of them.
    ///
    /// Any failure aborts the run; the first failing source (in configured
    /// order) is returned and every failure is logged.
    #[instrument(skip(self), fields(sources = self.sources.len()))]
    pub async fn collect_books(&self) -> Result<Vec<OrderBook>, SourceUnavailable> {
        let results = join_all(self.sources.iter().map(|s| self.fetch_one(s))).await;

        let mut books = Vec::with_capacity(results.len());
        let mut first_failure = None;
        for result in results {
            match result {
                Ok(book) => {
                    let (bid, ask) = book.bbo();
                    info!(
                        venue = book.venue(),
                        bids = book.bids().len(),
                        asks = book.asks().len(),
                        skipped = book.skipped(),
                        best_bid = ?bid.map(|l| l.price()),
                        best_ask = ?ask.map(|l| l.price()),
                        "Fetched book"
                    );
                    books.push(book);
                }
                Err(e) => {
                    error!(venue = %e.venue, reason = %e.reason, "Source unavailable");
                    metrics::counter!("lobx_source_failures_total", "venue" => e.venue.clone())
                        .increment(1);
                    first_failure.get_or_insert(e);
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(books),
        }
    }

    /// One full pass: fetch, merge, and price `quantity` on both sides.
    #[instrument(skip(self))]
    pub async fn run(&self, quantity: Decimal) -> AggResult<MarketQuote> {
        let books = self.collect_books().await?;
        let book = aggregate(&books);
        info!(
            bids = book.bids().len(),
            asks = book.asks().len(),
            spread = ?book.spread(),
            "Aggregated book ready"
        );

        let buy = simulate_buy(book.asks(), quantity)?;
        let sell = simulate_sell(book.bids(), quantity)?;
        Ok(MarketQuote { quantity, buy, sell, book })
    }
}
