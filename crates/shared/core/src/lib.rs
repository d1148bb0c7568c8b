//! Hermes Core Domain
//!
//! Pure domain types for the Hermes execution router: venues, their resting
//! orders, and the execution plans produced by sweeping them.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Direction, ExecutionLine, ExecutionPlan, OrderId, OrderSide, RestingOrder, Venue, VenueId,
};
pub use values::{Balance, Price, Quantity};
