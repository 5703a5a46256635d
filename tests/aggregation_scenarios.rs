use lobx_agg::engine::execution::{simulate_buy, simulate_sell};
use lobx_agg::market_data::adapters::coinbase::CoinbaseAdapter;
use lobx_agg::market_data::adapters::gemini::GeminiAdapter;
use lobx_agg::market_data::adapters::{coinbase, gemini, VenueAdapter};
use lobx_agg::market_data::unified_book::aggregate;
use lobx_agg::report::format_usd;
use rust_decimal_macros::dec;
use serde_json::json;

fn gemini() -> GeminiAdapter {
    GeminiAdapter::new(reqwest::Client::new(), gemini::DEFAULT_URL)
}

fn coinbase() -> CoinbaseAdapter {
    CoinbaseAdapter::new(reqwest::Client::new(), coinbase::DEFAULT_URL)
}

#[test]
fn malformed_bid_among_valid_ones_leaves_two_levels() {
    let gem = gemini()
        .normalize(&json!({
            "bids": [
                {"price": "100.00", "amount": "1"},
                {"price": "not-a-price", "amount": "1"},
                {"price": "99.50", "amount": "2"}
            ],
            "asks": []
        }))
        .unwrap();

    let agg = aggregate([&gem]);
    assert_eq!(agg.bids().len(), 2);
    assert_eq!(agg.bids()[0].price(), dec!(100.00));
    assert_eq!(agg.bids()[1].price(), dec!(99.50));
}

#[test]
fn level_too_large_to_price_is_skipped_not_fatal() {
    let gem = gemini()
        .normalize(&json!({
            "bids": [{"price": "43000.00", "amount": "1"}],
            "asks": [
                {"price": "50000000000000000000000000000", "amount": "2"},
                {"price": "43010.00", "amount": "1"}
            ]
        }))
        .unwrap();
    assert_eq!(gem.skipped(), 1);

    let agg = aggregate([&gem]);
    assert_eq!(agg.asks().len(), 1);
    let buy = simulate_buy(agg.asks(), dec!(2)).unwrap();
    assert_eq!(buy.filled_quantity, dec!(1));
    assert_eq!(buy.total_value, dec!(43010.00));
}

#[test]
fn two_venue_snapshot_end_to_end() {
    let gem = gemini()
        .normalize(&json!({
            "bids": [{"price": "43000.00", "amount": "1.5"}, {"price": "42990.00", "amount": "4"}],
            "asks": [{"price": "43010.00", "amount": "2"}, {"price": "43030.00", "amount": "5"}]
        }))
        .unwrap();
    let cb = coinbase()
        .normalize(&json!({
            "sequence": 1,
            "bids": [["43005.00", "0.5", 1], ["42980.00", "10", 4]],
            "asks": [["43020.00", "3", 2], ["43008.00", "0.25", 1]]
        }))
        .unwrap();

    let agg = aggregate([&gem, &cb]);
    assert_eq!(agg.best_bid().unwrap().price(), dec!(43005.00));
    assert_eq!(agg.best_ask().unwrap().price(), dec!(43008.00));

    // 0.25 @ 43008 + 2 @ 43010 + 2.75 @ 43020
    let buy = simulate_buy(agg.asks(), dec!(5)).unwrap();
    assert_eq!(buy.total_value, dec!(10752) + dec!(86020) + dec!(118305));
    assert_eq!(format_usd(buy.total_value), "$215,077.00");

    // 0.5 @ 43005 + 1.5 @ 43000 + 3 @ 42990
    let sell = simulate_sell(agg.bids(), dec!(5)).unwrap();
    assert_eq!(sell.total_value, dec!(21502.5) + dec!(64500) + dec!(128970));
    assert_eq!(format_usd(sell.total_value), "$214,972.50");
}
