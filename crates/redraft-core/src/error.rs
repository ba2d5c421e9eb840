use thiserror::Error;

/// Top-level error type for the Redraft system.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for RedraftError`
/// so that the `?` operator works seamlessly across crate boundaries.
///
/// The first four variants are the boundary-failure taxonomy: all of them are
/// recovered locally and none are fatal to a session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RedraftError {
    /// Non-success response from the completion or relay boundary.
    #[error("Transport error (status {status}): {body}")]
    Transport { status: u16, body: String },

    /// Success status but the expected content field was missing.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Speech recognition, synthesis, or clipboard is not supported in the
    /// hosting environment.
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// The clipboard write was rejected (permission denied or unsupported).
    #[error("Clipboard write denied: {0}")]
    ClipboardDenied(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Voice error: {0}")]
    Voice(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for RedraftError {
    fn from(err: toml::de::Error) -> Self {
        RedraftError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for RedraftError {
    fn from(err: toml::ser::Error) -> Self {
        RedraftError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for RedraftError {
    fn from(err: serde_json::Error) -> Self {
        RedraftError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Redraft operations.
pub type Result<T> = std::result::Result<T, RedraftError>;
