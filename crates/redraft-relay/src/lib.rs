//! Credential-injecting relay between the client and the completion
//! provider.
//!
//! The client posts a provider-shaped request here with no credential; the
//! relay attaches the key from its own environment and forwards the payload
//! unchanged, then passes the provider's status and body straight back.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::RelayError;
pub use routes::{create_router, serve};
pub use state::{RelayState, API_KEY_VAR};
