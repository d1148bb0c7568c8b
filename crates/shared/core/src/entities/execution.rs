use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Direction, OrderId, VenueId};
use crate::values::{Price, Quantity};

/// Immutable record of one fill against a resting order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLine {
    pub order_id: OrderId,
    pub venue_id: VenueId,
    pub venue_name: String,
    pub size: Quantity,
    pub price: Price,
}

impl ExecutionLine {
    /// Quote value of this fill; `None` if it exceeds the decimal range
    pub fn value(&self) -> Option<Decimal> {
        self.size.checked_mul(self.price)
    }
}

/// Ordered fills produced by one allocation, plus the aggregate quote value.
///
/// The aggregate is a cost when acquiring and a revenue when disposing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub direction: Direction,
    pub lines: Vec<ExecutionLine>,
    total: Decimal,
}

impl ExecutionPlan {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            lines: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    /// Append a fill and accumulate its value.
    ///
    /// Returns `None` and leaves the plan unchanged when the running total
    /// would overflow.
    pub fn record(&mut self, line: ExecutionLine) -> Option<()> {
        self.total = self.total.checked_add(line.value()?)?;
        self.lines.push(line);
        Some(())
    }

    /// Sum of all filled sizes
    pub fn filled(&self) -> Quantity {
        self.lines.iter().map(|l| l.size).sum()
    }

    /// Aggregate quote value regardless of direction
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Total paid, for acquire plans
    pub fn total_cost(&self) -> Option<Decimal> {
        self.direction.is_acquire().then_some(self.total)
    }

    /// Total received, for dispose plans
    pub fn total_revenue(&self) -> Option<Decimal> {
        (!self.direction.is_acquire()).then_some(self.total)
    }

    /// Size-weighted average fill price
    pub fn average_price(&self) -> Option<Price> {
        let filled = self.filled();
        if filled.is_zero() {
            None
        } else {
            self.total.checked_div(filled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn line(order_id: OrderId, size: Decimal, price: Decimal) -> ExecutionLine {
        ExecutionLine {
            order_id,
            venue_id: Uuid::nil(),
            venue_name: "Exchange1".to_string(),
            size,
            price,
        }
    }

    #[test]
    fn test_record_accumulates_cost() {
        let mut plan = ExecutionPlan::new(Direction::Acquire);
        plan.record(line(1, dec!(1), dec!(50000))).unwrap();
        plan.record(line(2, dec!(0.5), dec!(50100))).unwrap();

        assert_eq!(plan.filled(), dec!(1.5));
        assert_eq!(plan.total_cost(), Some(dec!(75050)));
        assert_eq!(plan.total_revenue(), None);
        assert_eq!(plan.average_price(), Some(dec!(75050) / dec!(1.5)));
    }

    #[test]
    fn test_dispose_plan_reports_revenue() {
        let mut plan = ExecutionPlan::new(Direction::Dispose);
        plan.record(line(3, dec!(1), dec!(51000))).unwrap();

        assert_eq!(plan.total_revenue(), Some(dec!(51000)));
        assert_eq!(plan.total_cost(), None);
    }

    #[test]
    fn test_record_rejects_overflowing_total() {
        let mut plan = ExecutionPlan::new(Direction::Dispose);
        plan.record(line(1, dec!(1), Decimal::MAX)).unwrap();

        assert_eq!(plan.record(line(2, dec!(1), dec!(1))), None);
        assert_eq!(plan.lines.len(), 1);
        assert_eq!(plan.total(), Decimal::MAX);
    }

    #[test]
    fn test_empty_plan() {
        let plan = ExecutionPlan::new(Direction::Acquire);
        assert!(plan.lines.is_empty());
        assert_eq!(plan.average_price(), None);
        assert_eq!(plan.total(), Decimal::ZERO);
    }
}
