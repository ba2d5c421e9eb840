//! Serialized markup rendering of diff segments.
//!
//! Added and removed segments become class-tagged spans; equal text is
//! emitted bare. Segment values are HTML-escaped since the output is a
//! serialized markup string handed straight to a display surface.

use crate::segment::{DiffKind, DiffSegment};

/// Escape the characters that are meaningful in markup.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render segments as an inline-highlight markup string.
pub fn render_markup(segments: &[DiffSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment.kind {
            DiffKind::Equal => out.push_str(&escape(&segment.value)),
            DiffKind::Added => {
                out.push_str("<span class=\"added\">");
                out.push_str(&escape(&segment.value));
                out.push_str("</span>");
            }
            DiffKind::Removed => {
                out.push_str("<span class=\"removed\">");
                out.push_str(&escape(&segment.value));
                out.push_str("</span>");
            }
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
