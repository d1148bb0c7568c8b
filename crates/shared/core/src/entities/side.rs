use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the market a resting order sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    /// Willing to buy the base asset (pays quote currency)
    Buy,
    /// Willing to sell the base asset (receives quote currency)
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "Buy"),
            OrderSide::Sell => write!(f, "Sell"),
        }
    }
}

impl TryFrom<&str> for OrderSide {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "buy" => Ok(OrderSide::Buy),
            "sell" => Ok(OrderSide::Sell),
            _ => Err("Invalid order side: must be Buy or Sell"),
        }
    }
}

/// Direction of an execution request against the venues
///
/// `Acquire` buys the base asset with quote currency, `Dispose` sells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Acquire,
    Dispose,
}

impl Direction {
    /// Side of the resting orders this direction consumes
    pub fn counter_side(&self) -> OrderSide {
        match self {
            Direction::Acquire => OrderSide::Sell,
            Direction::Dispose => OrderSide::Buy,
        }
    }

    pub fn is_acquire(&self) -> bool {
        matches!(self, Direction::Acquire)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Acquire => write!(f, "buy"),
            Direction::Dispose => write!(f, "sell"),
        }
    }
}

impl TryFrom<&str> for Direction {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "buy" | "acquire" => Ok(Direction::Acquire),
            "sell" | "dispose" => Ok(Direction::Dispose),
            _ => Err("Invalid order type: use 'buy' or 'sell'"),
        }
    }
}
