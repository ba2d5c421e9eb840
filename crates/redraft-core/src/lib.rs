pub mod config;
pub mod error;
pub mod input;
pub mod prompts;
pub mod types;

pub use config::RedraftConfig;
pub use error::{RedraftError, Result};
pub use input::InputBuffer;
pub use prompts::{style_prompt, RewriteStyle, StylePrompt};
pub use types::{
    ChatMessage, CompletionBackend, CompletionRequest, CompletionResponse, Role,
};
