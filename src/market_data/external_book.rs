use rust_decimal::Decimal;

use crate::engine::types::PriceLevel;

// One venue's normalized snapshot. Level order is whatever the venue sent;
// the aggregator owns final ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBook {
    venue: String,
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
    skipped: usize,
}

impl OrderBook {
    pub fn new(venue: impl Into<String>, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self { venue: venue.into(), bids, asks, skipped: 0 }
    }

    /// Record how many malformed entries the adapter dropped while building this book.
    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn level_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.level_count() == 0
    }

    /// Best bid and best ask of this venue alone. Does not assume sorted input.
    pub fn bbo(&self) -> (Option<PriceLevel>, Option<PriceLevel>) {
        let best_bid = self.bids.iter().copied().max_by_key(|l| l.price());
        let best_ask = self.asks.iter().copied().min_by_key(|l| l.price());
        (best_bid, best_ask)
    }

    pub fn bid_depth(&self) -> Option<Decimal> {
        total_quantity(&self.bids)
    }

    pub fn ask_depth(&self) -> Option<Decimal> {
        total_quantity(&self.asks)
    }
}

fn total_quantity(levels: &[PriceLevel]) -> Option<Decimal> {
    levels.iter().try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.quantity()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lvl(p: Decimal, q: Decimal) -> PriceLevel {
        PriceLevel::new(p, q).unwrap()
    }

    #[test]
    fn test_bbo_on_unsorted_levels() {
        let book = OrderBook::new(
            "gemini",
            vec![lvl(dec!(99), dec!(1)), lvl(dec!(99.5), dec!(2)), lvl(dec!(98), dec!(3))],
            vec![lvl(dec!(101), dec!(1)), lvl(dec!(100.5), dec!(4))],
        );
        let (bid, ask) = book.bbo();
        assert_eq!(bid.unwrap().price(), dec!(99.5));
        assert_eq!(ask.unwrap().price(), dec!(100.5));
        assert_eq!(book.bid_depth(), Some(dec!(6)));
        assert_eq!(book.ask_depth(), Some(dec!(5)));
        assert_eq!(book.level_count(), 5);
    }

    #[test]
    fn test_empty_book_has_no_bbo() {
        let book = OrderBook::new("coinbase", vec![], vec![]);
        assert!(book.is_empty());
        assert_eq!(book.bbo(), (None, None));
    }

    #[test]
    fn test_depth_past_decimal_range_is_none() {
        let big = dec!(50000000000000000000000000000);
        let book = OrderBook::new("gemini", vec![lvl(dec!(1), big), lvl(dec!(1), big)], vec![]);
        assert_eq!(book.bid_depth(), None);
        assert_eq!(book.ask_depth(), Some(Decimal::ZERO));
    }
}
