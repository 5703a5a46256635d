use rust_decimal::Decimal;
use tracing::{debug, instrument, trace, warn};

use crate::engine::types::{ExecutionResult, PriceLevel, Side};
use crate::error::ExecutionOverflow;

/// Cost of buying `target_quantity` by lifting `asks` (lowest price first).
pub fn simulate_buy(
    asks: &[PriceLevel],
    target_quantity: Decimal,
) -> Result<ExecutionResult, ExecutionOverflow> {
    simulate(Side::BUY, asks, target_quantity)
}

/// Revenue from selling `target_quantity` into `bids` (highest price first).
pub fn simulate_sell(
    bids: &[PriceLevel],
    target_quantity: Decimal,
) -> Result<ExecutionResult, ExecutionOverflow> {
    simulate(Side::SELL, bids, target_quantity)
}

/// Greedy walk of `levels` in the order given until the target is met or the
/// levels run out. The caller supplies levels already in price priority.
///
/// Fails only if the running total leaves the `Decimal` range; nothing is
/// rounded or clamped to stay inside it.
#[instrument(level = "debug", skip(levels), fields(depth = levels.len()))]
pub fn simulate(
    side: Side,
    levels: &[PriceLevel],
    target_quantity: Decimal,
) -> Result<ExecutionResult, ExecutionOverflow> {
    let mut result = ExecutionResult::empty(side, target_quantity);
    if target_quantity <= Decimal::ZERO {
        debug!(%side, %target_quantity, "Non-positive target, nothing to walk");
        return Ok(result);
    }

    for level in levels {
        if result.filled_quantity >= target_quantity {
            break;
        }
        let remaining = target_quantity - result.filled_quantity;
        let take = level.quantity().min(remaining);
        let total = take
            .checked_mul(level.price())
            .and_then(|value| result.total_value.checked_add(value))
            .ok_or(ExecutionOverflow {
                side,
                filled: result.filled_quantity,
                levels_consumed: result.levels_consumed,
            })?;
        result.total_value = total;
        result.filled_quantity += take;
        result.levels_consumed += 1;
        trace!(price = %level.price(), take = %take, filled = %result.filled_quantity, "Level consumed");
    }

    if result.is_partial() {
        warn!(
            %side,
            book_side = side.opposite_label(),
            target = %target_quantity,
            filled = %result.filled_quantity,
            "Insufficient liquidity, partial fill"
        );
    } else {
        debug!(%side, filled = %result.filled_quantity, value = %result.total_value, levels = result.levels_consumed, "Target filled");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn book(levels: &[(Decimal, Decimal)]) -> Vec<PriceLevel> {
        levels.iter().map(|&(p, q)| PriceLevel::new(p, q).unwrap()).collect()
    }

    #[test]
    fn test_buy_walks_into_second_level() {
        let asks = book(&[(dec!(100), dec!(2)), (dec!(101), dec!(3))]);
        let result = simulate_buy(&asks, dec!(4)).unwrap();
        assert_eq!(result.filled_quantity, dec!(4));
        assert_eq!(result.total_value, dec!(402));
        assert_eq!(result.levels_consumed, 2);
        assert!(result.is_complete());
    }

    #[test]
    fn test_sell_partial_fill() {
        let bids = book(&[(dec!(99), dec!(1))]);
        let result = simulate_sell(&bids, dec!(5)).unwrap();
        assert_eq!(result.filled_quantity, dec!(1));
        assert_eq!(result.total_value, dec!(99));
        assert!(result.is_partial());
        assert_eq!(result.shortfall(), dec!(4));
    }

    #[test]
    fn test_zero_target_visits_nothing() {
        let asks = book(&[(dec!(100), dec!(2))]);
        let result = simulate_buy(&asks, dec!(0)).unwrap();
        assert_eq!(result.filled_quantity, Decimal::ZERO);
        assert_eq!(result.total_value, Decimal::ZERO);
        assert_eq!(result.levels_consumed, 0);
    }

    #[test]
    fn test_empty_levels() {
        let result = simulate_sell(&[], dec!(3)).unwrap();
        assert_eq!(result.filled_quantity, Decimal::ZERO);
        assert_eq!(result.total_value, Decimal::ZERO);
        assert!(result.is_partial());
    }

    #[test]
    fn test_exact_fill_stops_before_next_level() {
        let asks = book(&[(dec!(100), dec!(2)), (dec!(101), dec!(3)), (dec!(500), dec!(1))]);
        let result = simulate_buy(&asks, dec!(5)).unwrap();
        assert_eq!(result.total_value, dec!(503));
        assert_eq!(result.levels_consumed, 2);
    }

    #[test]
    fn test_fractional_quantities_stay_exact() {
        let asks = book(&[(dec!(43210.57), dec!(0.1)), (dec!(43210.58), dec!(0.2))]);
        let result = simulate_buy(&asks, dec!(0.3)).unwrap();
        assert_eq!(result.filled_quantity, dec!(0.3));
        assert_eq!(result.total_value, dec!(12963.173));
    }

    #[test]
    fn test_total_beyond_decimal_range_is_an_error() {
        // Each level fits on its own, their sum does not.
        let big = dec!(50000000000000000000000000000);
        let asks = book(&[(big, dec!(1)), (big, dec!(1))]);
        let err = simulate_buy(&asks, dec!(2)).unwrap_err();
        assert_eq!(
            err,
            ExecutionOverflow { side: Side::BUY, filled: dec!(1), levels_consumed: 1 }
        );

        // Stopping before the second level stays in range.
        let result = simulate_buy(&asks, dec!(1)).unwrap();
        assert_eq!(result.total_value, big);
    }
}
