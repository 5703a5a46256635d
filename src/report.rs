// Presentation boundary. The only place values are rounded.

use itertools::Itertools;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::engine::types::ExecutionResult;
use crate::market_data::router::MarketQuote;

/// `$1,234,567.89`, rounded half away from zero to cents.
pub fn format_usd(value: Decimal) -> String {
    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    let sign = if cents.is_sign_negative() && !cents.is_zero() { "-" } else { "" };
    let text = cents.abs().to_string();
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let grouped = whole
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .join(",");
    format!("{}${}.{}", sign, grouped, frac)
}

pub fn render_side(asset: &str, result: &ExecutionResult) -> String {
    let mut line = format!(
        "To {} {} {}: {}",
        result.side,
        result.target_quantity.normalize(),
        asset,
        format_usd(result.total_value)
    );
    if result.is_partial() {
        line.push_str(&format!(
            " (partial fill: only {} {} available)",
            result.filled_quantity.normalize(),
            asset
        ));
    }
    line
}

/// Buy line then sell line.
pub fn render_quote(asset: &str, quote: &MarketQuote) -> String {
    format!("{}\n{}", render_side(asset, &quote.buy), render_side(asset, &quote.sell))
}
