//! Revision session: the client-side orchestration of one outstanding AI
//! request, the rewrite suggestion store, and the correction highlight.

pub mod error;
pub mod session;
pub mod store;

pub use error::SessionError;
pub use session::{Highlight, RevisionSession, SessionState};
pub use store::{Clipboard, LoggingClipboard, Suggestion, SuggestionStore};
