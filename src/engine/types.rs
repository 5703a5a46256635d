use rust_decimal::Decimal;

use crate::error::MalformedEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    BUY,
    SELL,
}

impl Side {
    /// Book side a taker on this side consumes: buys lift asks, sells hit bids.
    pub fn opposite_label(&self) -> &'static str {
        match self {
            Side::BUY => "asks",
            Side::SELL => "bids",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::BUY => write!(f, "buy"),
            Side::SELL => write!(f, "sell"),
        }
    }
}

// One resting order-book entry, already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevel {
    price: Decimal,
    quantity: Decimal,
}

impl PriceLevel {
    /// Build a level, rejecting anything that could not rest on a real book.
    pub fn new(price: Decimal, quantity: Decimal) -> Result<Self, MalformedEntry> {
        if price.is_sign_negative() {
            return Err(MalformedEntry::Negative { field: "price", value: price.to_string() });
        }
        if quantity.is_sign_negative() {
            return Err(MalformedEntry::Negative { field: "quantity", value: quantity.to_string() });
        }
        if price.is_zero() {
            return Err(MalformedEntry::Zero { field: "price" });
        }
        if quantity.is_zero() {
            return Err(MalformedEntry::Zero { field: "quantity" });
        }
        if price.checked_mul(quantity).is_none() {
            return Err(MalformedEntry::OutOfRange {
                price: price.to_string(),
                quantity: quantity.to_string(),
            });
        }
        Ok(Self { price, quantity })
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    // Never overflows: `new` refuses levels whose product does not fit.
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }
}

/// Outcome of walking one side of the book for a target quantity.
///
/// `total_value` is cost for a buy and revenue for a sell. It is never rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    pub side: Side,
    pub target_quantity: Decimal,
    pub filled_quantity: Decimal,
    pub total_value: Decimal,
    pub levels_consumed: usize,
}

impl ExecutionResult {
    pub fn empty(side: Side, target_quantity: Decimal) -> Self {
        Self {
            side,
            target_quantity,
            filled_quantity: Decimal::ZERO,
            total_value: Decimal::ZERO,
            levels_consumed: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.filled_quantity >= self.target_quantity
    }

    pub fn is_partial(&self) -> bool {
        !self.is_complete()
    }

    /// Quantity the book could not supply.
    pub fn shortfall(&self) -> Decimal {
        (self.target_quantity - self.filled_quantity).max(Decimal::ZERO)
    }

    /// Volume-weighted average fill price, if anything filled.
    pub fn average_price(&self) -> Option<Decimal> {
        if self.filled_quantity.is_zero() {
            None
        } else {
            self.total_value.checked_div(self.filled_quantity)
        }
    }
}
