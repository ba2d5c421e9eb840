//! Relay error types and JSON error response formatting.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "internal_error").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// Relay error type that maps to HTTP status codes and JSON responses.
///
/// Only failures of the relay itself use this type; upstream failures are
/// passed through with their original status and body instead.
#[derive(Debug)]
pub enum RelayError {
    /// 400 Bad Request - malformed relay request.
    BadRequest(String),
    /// 500 Internal Server Error - missing credential or forwarding failure.
    Internal(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            RelayError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            RelayError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
