//! Route handlers for the credential-injecting relay.
//!
//! The completion handler is a pass-through proxy: the client body is
//! forwarded to the provider byte for byte, the only addition being the
//! `Authorization` header injected here, server-side. The provider's status
//! and body come back unchanged so the client sees exactly what the
//! provider said.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::RelayError;
use crate::state::RelayState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

/// GET /health
pub async fn health(State(state): State<RelayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /api/completion
///
/// Forwards the request body to the provider with the credential attached.
/// Fails with 500 before contacting the provider when no credential is
/// configured.
pub async fn completion(
    State(state): State<RelayState>,
    body: Bytes,
) -> Result<Response, RelayError> {
    let api_key = state.api_key.as_deref().ok_or_else(|| {
        RelayError::Internal("provider credential is not configured".to_string())
    })?;

    tracing::debug!(upstream = %state.upstream_url, bytes = body.len(), "Forwarding completion request");

    let upstream = state
        .client
        .post(&state.upstream_url)
        .bearer_auth(api_key)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Upstream request failed");
            RelayError::Internal(format!("upstream request failed: {}", e))
        })?;

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = upstream.bytes().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to read upstream response");
        RelayError::Internal(format!("failed to read upstream response: {}", e))
    })?;

    if !status.is_success() {
        tracing::warn!(status = %status, "Upstream returned non-success; passing through");
    }

    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

// =============================================================================
// Tests
// =============================================================================
