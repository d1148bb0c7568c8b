use hermes_core::VenueId;
use thiserror::Error;

/// Errors raised by venue storage adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Venue store unavailable: {0}")]
    Unavailable(String),

    #[error("Venue {venue_id} was modified concurrently: expected version {expected}, found {found}")]
    Conflict {
        venue_id: VenueId,
        expected: u64,
        found: u64,
    },

    #[error("Unknown venue: {0}")]
    UnknownVenue(VenueId),

    #[error("IO error: {0}")]
    Io(String),
}

impl StoreError {
    /// True when retrying the whole operation on a fresh snapshot may succeed
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
