//! Shared state for the relay handlers.

use std::time::Instant;

use redraft_core::config::CompletionConfig;

/// Environment variable holding the provider credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Shared relay state, cloned into each handler task.
///
/// The credential lives only here, on the server side. It is read from the
/// environment at startup and never appears in any payload the client sees.
#[derive(Clone)]
pub struct RelayState {
    /// Provider endpoint requests are forwarded to.
    pub upstream_url: String,
    /// Provider credential, if configured.
    pub api_key: Option<String>,
    /// Shared HTTP client for upstream calls.
    pub client: reqwest::Client,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl RelayState {
    pub fn new(config: &CompletionConfig, api_key: Option<String>) -> Self {
        Self {
            upstream_url: config.upstream_url.clone(),
            api_key,
            client: reqwest::Client::new(),
            start_time: Instant::now(),
        }
    }

    /// Build state with the credential from the environment.
    pub fn from_env(config: &CompletionConfig) -> Self {
        let api_key = std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!(var = API_KEY_VAR, "Provider credential not set; completion requests will fail");
        }
        Self::new(config, api_key)
    }
}
