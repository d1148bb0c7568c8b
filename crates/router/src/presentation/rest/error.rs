use crate::error::ExecutionError;
use crate::presentation::rest::dto::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub code: i32,
    pub message: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(code: i32, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, -1000, message)
    }

    pub fn invalid_parameter(param: &str, reason: &str) -> Self {
        Self::bad_request(-1100, format!("Illegal parameter '{}': {}", param, reason))
    }

    pub fn malformed_body(reason: impl Into<String>) -> Self {
        Self::bad_request(-1101, reason)
    }
}

impl From<ExecutionError> for ApiError {
    fn from(err: ExecutionError) -> Self {
        let message = err.to_string();
        match err {
            ExecutionError::InvalidRequest(msg) => Self::bad_request(-1102, msg),
            ExecutionError::NoLiquiditySource => Self::new(StatusCode::NOT_FOUND, -2001, message),
            ExecutionError::InsufficientLiquidity { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, -2002, message)
            }
            ref e if e.is_conflict() => Self::new(StatusCode::CONFLICT, -2003, message),
            ExecutionError::ArithmeticOverflow(_)
            | ExecutionError::SnapshotFailure(_)
            | ExecutionError::CommitFailure(_) => Self::internal(message),
            ExecutionError::Cancelled => Self::new(StatusCode::SERVICE_UNAVAILABLE, -1007, message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.code, self.message));
        (self.status, body).into_response()
    }
}
