use hermes_allocation::AllocationError;
use hermes_core::Quantity;
use hermes_ports::StoreError;
use thiserror::Error;

/// Failures of one execution request
///
/// Every variant is scoped to the request that produced it. Only
/// `CommitFailure` can follow a computed plan; all others leave persisted
/// state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No liquidity source available")]
    NoLiquiditySource,

    #[error("Insufficient liquidity: requested {requested}, only {filled} fillable")]
    InsufficientLiquidity {
        requested: Quantity,
        filled: Quantity,
    },

    #[error("Venue data out of range: {0}")]
    ArithmeticOverflow(String),

    #[error("Failed to load venue snapshot: {0}")]
    SnapshotFailure(#[source] StoreError),

    #[error("Failed to commit execution: {0}")]
    CommitFailure(#[source] StoreError),

    #[error("Execution cancelled")]
    Cancelled,
}

impl ExecutionError {
    /// True when the commit lost an optimistic concurrency race
    pub fn is_conflict(&self) -> bool {
        matches!(self, ExecutionError::CommitFailure(e) if e.is_conflict())
    }
}

pub type Result<T> = std::result::Result<T, ExecutionError>;

impl From<AllocationError> for ExecutionError {
    fn from(err: AllocationError) -> Self {
        let message = err.to_string();
        match err {
            AllocationError::NoLiquiditySource => ExecutionError::NoLiquiditySource,
            AllocationError::InvalidQuantity(q) => {
                ExecutionError::InvalidRequest(format!("Amount must be greater than zero, got {q}"))
            }
            AllocationError::InsufficientLiquidity { requested, filled } => {
                ExecutionError::InsufficientLiquidity { requested, filled }
            }
            AllocationError::ArithmeticOverflow { .. } => {
                ExecutionError::ArithmeticOverflow(message)
            }
        }
    }
}
