//! Hermes Ports
//!
//! Port definitions (traits) for the Hermes execution router.
//! These define the boundaries between the allocation logic and the
//! storage that supplies venue snapshots and persists their mutations.

mod error;
mod venues;

pub use error::{StoreError, StoreResult};
pub use venues::{CommitSink, VenueSnapshotProvider};
