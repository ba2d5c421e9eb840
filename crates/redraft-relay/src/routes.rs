//! Router setup for the relay.

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::RelayState;

/// Create the axum Router with all relay routes and middleware.
pub fn create_router(state: RelayState) -> Router {
    // The relay fronts a browser-style client; any origin may call it, the
    // credential never leaves the server.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/completion", post(handlers::completion))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve the relay on the given port.
pub async fn serve(state: RelayState, port: u16) -> Result<(), std::io::Error> {
    let addr = format!("127.0.0.1:{}", port);
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Relay listening");
    axum::serve(listener, router).await
}
