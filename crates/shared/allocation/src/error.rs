use hermes_core::{OrderId, Quantity};
use thiserror::Error;

/// Domain-level errors for allocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("No venues available")]
    NoLiquiditySource,

    #[error("Requested quantity must be positive, got {0}")]
    InvalidQuantity(Quantity),

    #[error("Insufficient liquidity: requested {requested}, only {filled} fillable")]
    InsufficientLiquidity {
        requested: Quantity,
        filled: Quantity,
    },

    #[error("Arithmetic overflow filling order {order_id} on {venue}")]
    ArithmeticOverflow { venue: String, order_id: OrderId },
}

pub type AllocationResult<T> = std::result::Result<T, AllocationError>;
