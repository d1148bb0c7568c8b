//! Hermes Allocation
//!
//! The allocation engine sweeps resting orders across every venue in price
//! priority, bounded by each venue's balances, and produces an execution
//! plan together with the mutated venue state.

mod engine;
mod error;

pub use engine::{Allocation, AllocationEngine};
pub use error::{AllocationError, AllocationResult};
