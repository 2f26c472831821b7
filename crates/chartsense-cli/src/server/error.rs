//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chartsense::ChartsenseError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Error from the chartsense library.
    Chartsense(ChartsenseError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Chartsense(e @ ChartsenseError::UnknownColumn(_)) => {
                (StatusCode::NOT_FOUND, "unknown_column", e.to_string())
            }
            ApiError::Chartsense(e) => (StatusCode::BAD_REQUEST, "chartsense_error", e.to_string()),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<ChartsenseError> for ApiError {
    fn from(err: ChartsenseError) -> Self {
        ApiError::Chartsense(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Chartsense(e) => write!(f, "Chartsense error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
