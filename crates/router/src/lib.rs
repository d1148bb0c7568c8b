//! Hermes Execution Router
//!
//! Buys or sells a quantity of the base asset by sweeping resting orders
//! across many independent venues, best price first, while respecting each
//! venue's own balances. A request either fills completely and is committed
//! as one unit, or fails and leaves every venue untouched.
//!
//! # Architecture
//!
//! - **Application**: `ExecutionCoordinator` (fetch, allocate, commit) and
//!   `ExecutionService` (conflict retries on top of it)
//! - **Infrastructure**: in-memory venue store, JSON seed loader, configuration
//! - **Presentation**: REST API (`/api/order`, `/api/venues`) and an
//!   interactive console
//!
//! The allocation itself lives in `hermes-allocation` and the venue model in
//! `hermes-core`.

pub mod application;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use application::{ExecuteCommand, ExecutionCoordinator, ExecutionService};
pub use error::{ExecutionError, Result};
pub use infrastructure::{InMemoryVenueStore, RouterConfig, SeedLoader};
pub use presentation::{AppState, Console, create_router};
