use async_trait::async_trait;
use hermes_core::Venue;

use crate::error::StoreResult;

/// Port for reading the current set of venues
///
/// Implementations return one internally consistent read of every venue with
/// all of its resting orders. The order of the returned venues, and of the
/// orders inside each venue, is the discovery order used to break price ties.
#[async_trait]
pub trait VenueSnapshotProvider: Send + Sync {
    /// Fetch every venue with its balances and resting orders
    async fn fetch_all_venues(&self) -> StoreResult<Vec<Venue>>;
}

/// Port for durably persisting venue mutations
///
/// A commit is all-or-nothing: either every venue in the set is written or
/// none is. Implementations must reject a set built from a stale snapshot
/// (see `StoreError::Conflict`) or serialize callers externally.
#[async_trait]
pub trait CommitSink: Send + Sync {
    /// Persist the full mutated venue set
    async fn commit(&self, venues: Vec<Venue>) -> StoreResult<()>;
}
