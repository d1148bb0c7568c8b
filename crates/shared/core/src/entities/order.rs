use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderSide;
use crate::values::{Price, Quantity};

/// Unique identifier for a resting order
pub type OrderId = u64;

/// A standing offer at a fixed price, consumable in part or whole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestingOrder {
    pub id: OrderId,
    /// Quote currency per unit of base asset
    pub price: Price,
    /// Size still available to fill
    pub remaining: Quantity,
    pub side: OrderSide,
}

impl RestingOrder {
    pub fn new(id: OrderId, side: OrderSide, price: Price, remaining: Quantity) -> Self {
        Self {
            id,
            price,
            remaining,
            side,
        }
    }

    pub fn sell(id: OrderId, price: Price, remaining: Quantity) -> Self {
        Self::new(id, OrderSide::Sell, price, remaining)
    }

    pub fn buy(id: OrderId, price: Price, remaining: Quantity) -> Self {
        Self::new(id, OrderSide::Buy, price, remaining)
    }

    /// Returns true once nothing is left to fill
    pub fn is_exhausted(&self) -> bool {
        self.remaining <= Decimal::ZERO
    }

    /// Consume `size` from the order, never going below zero
    pub fn consume(&mut self, size: Quantity) {
        self.remaining = (self.remaining - size).max(Decimal::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_consume_partially_then_fully() {
        let mut order = RestingOrder::sell(1, dec!(50000), dec!(2));
        order.consume(dec!(0.5));
        assert_eq!(order.remaining, dec!(1.5));
        assert!(!order.is_exhausted());

        order.consume(dec!(1.5));
        assert_eq!(order.remaining, Decimal::ZERO);
        assert!(order.is_exhausted());
    }

    #[test]
    fn test_buy_constructor_tags_side() {
        let order = RestingOrder::buy(7, dec!(51000), dec!(0.25));
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.remaining, dec!(0.25));
    }
}
