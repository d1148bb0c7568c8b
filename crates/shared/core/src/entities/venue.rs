use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Direction, RestingOrder};
use crate::values::{Balance, Price, Quantity};

/// Unique identifier for a venue
pub type VenueId = Uuid;

/// An independent market participant holding its own balances and resting orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    /// Quote currency available to pay for the base asset
    pub quote_balance: Balance,
    /// Base asset available to deliver
    pub base_balance: Balance,
    /// Resting sell orders, consumed when acquiring
    pub asks: Vec<RestingOrder>,
    /// Resting buy orders, consumed when disposing
    pub bids: Vec<RestingOrder>,
    /// Concurrency token owned by the store; bumped on every commit
    #[serde(default)]
    pub version: u64,
}

impl Venue {
    pub fn new(name: impl Into<String>, quote_balance: Balance, base_balance: Balance) -> Self {
        Self::with_id(Uuid::new_v4(), name, quote_balance, base_balance)
    }

    pub fn with_id(
        id: VenueId,
        name: impl Into<String>,
        quote_balance: Balance,
        base_balance: Balance,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quote_balance,
            base_balance,
            asks: Vec::new(),
            bids: Vec::new(),
            version: 0,
        }
    }

    pub fn with_ask(mut self, order: RestingOrder) -> Self {
        self.asks.push(order);
        self
    }

    pub fn with_bid(mut self, order: RestingOrder) -> Self {
        self.bids.push(order);
        self
    }

    /// Orders usable for the given request direction
    pub fn book(&self, direction: Direction) -> &[RestingOrder] {
        match direction {
            Direction::Acquire => &self.asks,
            Direction::Dispose => &self.bids,
        }
    }

    pub fn book_mut(&mut self, direction: Direction) -> &mut Vec<RestingOrder> {
        match direction {
            Direction::Acquire => &mut self.asks,
            Direction::Dispose => &mut self.bids,
        }
    }

    /// Largest size this venue can fill at `price` given its balances.
    ///
    /// Acquiring is bounded by the quote balance, disposing by the base
    /// balance. The quote bound is rounded down so that
    /// `ceiling * price <= quote_balance` holds exactly. A quotient beyond the
    /// decimal range yields `Decimal::MAX`, leaving the order size to bind.
    pub fn balance_ceiling(&self, direction: Direction, price: Price) -> Quantity {
        match direction {
            Direction::Acquire => affordable_size(self.quote_balance, price),
            Direction::Dispose => self.base_balance.max(Decimal::ZERO),
        }
    }

    /// Apply the balance movements of one fill.
    ///
    /// Returns `None` and leaves both balances untouched if either would
    /// overflow.
    pub fn settle(&mut self, direction: Direction, size: Quantity, price: Price) -> Option<()> {
        let value = size.checked_mul(price)?;
        let (quote, base) = match direction {
            Direction::Acquire => (
                self.quote_balance.checked_sub(value)?,
                self.base_balance.checked_add(size)?,
            ),
            Direction::Dispose => (
                self.quote_balance.checked_add(value)?,
                self.base_balance.checked_sub(size)?,
            ),
        };
        self.quote_balance = quote;
        self.base_balance = base;
        Some(())
    }

    /// Drop fully consumed orders from both books
    pub fn prune_exhausted(&mut self) {
        self.asks.retain(|o| !o.is_exhausted());
        self.bids.retain(|o| !o.is_exhausted());
    }

    pub fn order_count(&self) -> usize {
        self.asks.len() + self.bids.len()
    }
}

fn affordable_size(balance: Balance, price: Price) -> Quantity {
    if balance <= Decimal::ZERO || price <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let Some(mut size) = balance.checked_div(price) else {
        return Decimal::MAX;
    };
    let step = Decimal::new(1, size.scale());
    // Division rounds at the last digit, which can overshoot the balance
    while size > Decimal::ZERO {
        match size.checked_mul(price) {
            Some(cost) if cost > balance => size -= step,
            _ => break,
        }
    }
    size.max(Decimal::ZERO)
}
