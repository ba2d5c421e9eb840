//! Wire types for the completion boundary.
//!
//! The completion call is an opaque request/response boundary: given a system
//! instruction and a user instruction it returns a single text completion.
//! This crate neither retries nor validates semantic correctness, only
//! transport success.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RedraftError;

/// Message role in a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// The full payload sent across the completion boundary.
///
/// Derived deterministically from the revision input plus a style prompt (or
/// the error-check instruction); it carries no mutable state of its own. The
/// `model` field is fixed configuration, never user-controlled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Build a request from a system instruction and a user instruction.
    pub fn new(model: &str, system_instruction: &str, user_instruction: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system_instruction.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user_instruction.to_string(),
                },
            ],
        }
    }
}

/// Success-shape response from the completion boundary.
///
/// Only the fields the client reads are modeled; everything else in the
/// provider payload is ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseMessage {
    pub content: String,
}

impl CompletionResponse {
    /// Extract the first candidate's content.
    ///
    /// Returns `MalformedResponse` when no candidate is present, which is how
    /// a success status with a missing content field surfaces.
    pub fn first_content(&self) -> Result<&str, RedraftError> {
        self.choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| {
                RedraftError::MalformedResponse("response contains no choices".to_string())
            })
    }
}

/// The external completion boundary.
///
/// Implementations forward the request to a language-model provider (normally
/// via the credential-injecting relay) and return the first candidate's text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, RedraftError>;
}

// =============================================================================
// Tests
// =============================================================================
