//! HTTP completion backend.
//!
//! Talks to the relay endpoint, never to the provider directly: the request
//! carries no credential, and the relay injects it server-side. The response
//! is the provider's chat-completion JSON passed through unchanged.

use async_trait::async_trait;
use reqwest::StatusCode;

use redraft_core::{CompletionBackend, CompletionRequest, CompletionResponse, RedraftError};

/// Completion backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCompletionBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCompletionBackend {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, RedraftError> {
        tracing::debug!(endpoint = %self.endpoint, model = %request.model, "Dispatching completion request");

        // Status 0 marks a failure before any response arrived.
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| RedraftError::Transport {
                status: 0,
                body: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| RedraftError::Transport {
            status: status.as_u16(),
            body: e.to_string(),
        })?;

        decode_response(status, &body)
    }
}

/// Map a relay response to the completion text.
///
/// Non-success statuses become transport errors carrying the upstream body;
/// success statuses must parse as a chat-completion response with at least
/// one choice.
fn decode_response(status: StatusCode, body: &str) -> Result<String, RedraftError> {
    if !status.is_success() {
        return Err(RedraftError::Transport {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let parsed: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| RedraftError::MalformedResponse(e.to_string()))?;
    Ok(parsed.first_content()?.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success() {
        let body = r#"{"choices":[{"message":{"content":"Rewritten text."}}]}"#;
        let content = decode_response(StatusCode::OK, body).unwrap();
        assert_eq!(content, "Rewritten text.");
    }

    #[test]
    fn test_decode_non_success_carries_upstream_body() {
        let err = decode_response(StatusCode::TOO_MANY_REQUESTS, "rate limited").unwrap_err();
        match err {
            RedraftError::Transport { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_invalid_json_is_malformed() {
        let err = decode_response(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, RedraftError::MalformedResponse(_)));
    }

    #[test]
    fn test_decode_empty_choices_is_malformed() {
        let err = decode_response(StatusCode::OK, r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, RedraftError::MalformedResponse(_)));
    }

    #[test]
    fn test_request_serializes_without_credentials() {
        let request = CompletionRequest::new("gpt-3.5-turbo", "system", "user");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-3.5-turbo\""));
        assert!(json.contains("\"role\":\"system\""));
        assert!(!json.to_lowercase().contains("authorization"));
        assert!(!json.to_lowercase().contains("api_key"));
    }
}
