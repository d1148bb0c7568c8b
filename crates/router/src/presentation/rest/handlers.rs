use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use hermes_core::Direction;
use log::debug;
use std::sync::Arc;

use crate::application::ExecuteCommand;
use crate::presentation::rest::{ApiError, dto::*};

use super::AppState;

/// GET /api/ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {})
}

/// POST /api/order
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<ExecutionPlanResponse>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::malformed_body(e.body_text()))?;

    let direction = Direction::try_from(req.order_type.as_str())
        .map_err(|_| ApiError::invalid_parameter("orderType", "must be buy or sell"))?;

    debug!("POST /api/order {} {}", direction, req.amount);

    let command = ExecuteCommand {
        quantity: req.amount,
        direction,
    };
    let cancel = state.shutdown.child_token();

    let plan = state
        .service
        .execute_with_cancellation(command, &cancel)
        .await?;

    Ok(Json(ExecutionPlanResponse::from(&plan)))
}

/// GET /api/venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VenueResponse>>, ApiError> {
    let venues = state.service.venues().await?;
    Ok(Json(venues.iter().map(VenueResponse::from).collect()))
}
