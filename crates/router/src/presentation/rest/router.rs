use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::handlers;
use crate::application::ExecutionService;
use crate::infrastructure::InMemoryVenueStore;

/// Execution service wired to the in-memory store on both ports
pub type VenueExecutionService = ExecutionService<InMemoryVenueStore, InMemoryVenueStore>;

/// Application state shared across handlers - uses concrete infrastructure types
pub struct AppState {
    pub service: Arc<VenueExecutionService>,
    /// Cancelled on shutdown; requests that have not reached commit stop early
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(service: Arc<VenueExecutionService>, shutdown: CancellationToken) -> Self {
        AppState { service, shutdown }
    }

    /// Build state over a store with its own shutdown token
    pub fn from_store(store: InMemoryVenueStore, max_conflict_retries: u32) -> Self {
        let store = Arc::new(store);
        let service = ExecutionService::new(Arc::clone(&store), store, max_conflict_retries);
        Self::new(Arc::new(service), CancellationToken::new())
    }
}

/// Create the REST API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        .route("/api/order", post(handlers::create_order))
        .route("/api/venues", get(handlers::list_venues))
        .with_state(state)
}
