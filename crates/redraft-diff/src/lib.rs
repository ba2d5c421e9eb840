//! Word-level diff between an original and a revised text.
//!
//! Produces tagged segments (equal / added / removed) in original-to-revised
//! order plus a serialized markup string for inline display. The diff is
//! lossless in both directions: keeping equal+added segments reconstructs the
//! revised text exactly, keeping equal+removed reconstructs the original.

pub mod lcs;
pub mod render;
pub mod segment;

pub use lcs::compute_diff;
pub use render::render_markup;
pub use segment::{original_text, revised_text, DiffKind, DiffSegment};
