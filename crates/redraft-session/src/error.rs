//! Error types for the revision session.

use redraft_core::RedraftError;

/// Errors from the session and suggestion store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("input text is empty")]
    EmptyInput,
    #[error("a request is already in flight")]
    RequestInFlight,
    #[error("suggestion index out of range: {0}")]
    IndexOutOfRange(usize),
    #[error(transparent)]
    Core(#[from] RedraftError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        assert_eq!(SessionError::EmptyInput.to_string(), "input text is empty");
        assert_eq!(
            SessionError::RequestInFlight.to_string(),
            "a request is already in flight"
        );
        assert_eq!(
            SessionError::IndexOutOfRange(3).to_string(),
            "suggestion index out of range: 3"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: SessionError = RedraftError::Transport {
            status: 502,
            body: "bad gateway".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Transport error (status 502): bad gateway");
        assert!(matches!(err, SessionError::Core(_)));
    }

    #[test]
    fn test_clipboard_denied_maps_through_core() {
        let err: SessionError = RedraftError::ClipboardDenied("unsupported".to_string()).into();
        assert!(err.to_string().contains("unsupported"));
    }
}
