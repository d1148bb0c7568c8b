use async_trait::async_trait;
use hermes_core::{Venue, VenueId};
use hermes_ports::{CommitSink, StoreError, StoreResult, VenueSnapshotProvider};
use log::debug;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory venue store
///
/// Implements both collaborator ports. Venues keep their insertion order,
/// which is the discovery order the allocation engine uses for ties.
/// Commits are validated and applied under one write lock, and each venue's
/// `version` acts as an optimistic concurrency token.
pub struct InMemoryVenueStore {
    venues: Arc<RwLock<Vec<Venue>>>,
}

impl InMemoryVenueStore {
    pub fn new() -> Self {
        Self {
            venues: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_venues(venues: Vec<Venue>) -> Self {
        Self {
            venues: Arc::new(RwLock::new(venues)),
        }
    }

    /// Add a venue, replacing any existing venue with the same id
    pub async fn insert(&self, venue: Venue) {
        let mut venues = self.venues.write().await;
        match venues.iter_mut().find(|v| v.id == venue.id) {
            Some(existing) => *existing = venue,
            None => venues.push(venue),
        }
    }

    pub async fn get(&self, id: VenueId) -> Option<Venue> {
        self.venues.read().await.iter().find(|v| v.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.venues.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.venues.read().await.is_empty()
    }
}

impl Default for InMemoryVenueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryVenueStore {
    fn clone(&self) -> Self {
        Self {
            venues: Arc::clone(&self.venues),
        }
    }
}

#[async_trait]
impl VenueSnapshotProvider for InMemoryVenueStore {
    async fn fetch_all_venues(&self) -> StoreResult<Vec<Venue>> {
        Ok(self.venues.read().await.clone())
    }
}

#[async_trait]
impl CommitSink for InMemoryVenueStore {
    async fn commit(&self, updates: Vec<Venue>) -> StoreResult<()> {
        let mut venues = self.venues.write().await;

        // Validate everything before writing anything
        let mut slots = Vec::with_capacity(updates.len());
        for update in &updates {
            let slot = venues
                .iter()
                .position(|v| v.id == update.id)
                .ok_or(StoreError::UnknownVenue(update.id))?;
            let stored = venues[slot].version;
            if stored != update.version {
                return Err(StoreError::Conflict {
                    venue_id: update.id,
                    expected: update.version,
                    found: stored,
                });
            }
            slots.push(slot);
        }

        for (slot, mut update) in slots.into_iter().zip(updates) {
            update.version += 1;
            debug!(
                "Committed venue {} at version {}: quote={}, base={}, orders={}",
                update.name,
                update.version,
                update.quote_balance,
                update.base_balance,
                update.order_count()
            );
            venues[slot] = update;
        }

        Ok(())
    }
}
