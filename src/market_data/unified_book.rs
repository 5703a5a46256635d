use rust_decimal::Decimal;
use tracing::debug;

use crate::engine::types::{PriceLevel, Side};
use crate::market_data::external_book::OrderBook;

/// Combined view over every venue's snapshot.
///
/// Bids are best (highest) first, asks best (lowest) first. Levels are never
/// coalesced by price: two venues quoting the same price stay as two levels,
/// in the order the venues were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregatedBook {
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
}

/// Merge venue books into one ordered book.
pub fn aggregate<'a, I>(books: I) -> AggregatedBook
where
    I: IntoIterator<Item = &'a OrderBook>,
{
    let mut bids = Vec::new();
    let mut asks = Vec::new();
    let mut venues = 0usize;
    for book in books {
        bids.extend_from_slice(book.bids());
        asks.extend_from_slice(book.asks());
        venues += 1;
    }

    // sort_by is stable: equal prices keep concatenation (venue) order
    bids.sort_by(|a, b| b.price().cmp(&a.price()));
    asks.sort_by(|a, b| a.price().cmp(&b.price()));

    debug!(venues, bids = bids.len(), asks = asks.len(), "Aggregated books");
    AggregatedBook { bids, asks }
}

impl AggregatedBook {
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    /// Levels a taker on `side` would consume, best first.
    pub fn liquidity_for(&self, side: Side) -> &[PriceLevel] {
        match side {
            Side::BUY => &self.asks,
            Side::SELL => &self.bids,
        }
    }

    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.first().copied()
    }

    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.first().copied()
    }

    /// best ask - best bid; negative when venues are crossed against each other
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price() - self.best_bid()?.price())
    }

    /// Total quantity available to a taker on `side`, `None` past the decimal range.
    pub fn depth(&self, side: Side) -> Option<Decimal> {
        self.liquidity_for(side).iter().try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.quantity()))
    }

    /// First `n` levels of each side, for display and logging.
    pub fn top_n(&self, n: usize) -> (&[PriceLevel], &[PriceLevel]) {
        (&self.bids[..n.min(self.bids.len())], &self.asks[..n.min(self.asks.len())])
    }

    pub fn level_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }
}
