//! Shared revision input buffer.
//!
//! The buffer is owned by the revision session; the voice controller holds a
//! clone but only ever appends to it, so dictation can never clobber text the
//! user typed directly. Both mutation paths run on the same event loop, and
//! each append reads and writes under one lock acquisition.

use std::sync::{Arc, Mutex};

/// Clone-shared handle to the mutable text buffer edited by direct user input
/// and appended to by dictation.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    text: Arc<Mutex<String>>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer contents (direct user edit).
    pub fn set(&self, text: &str) {
        let mut guard = self.text.lock().expect("input buffer mutex poisoned");
        *guard = text.to_string();
    }

    /// Current buffer contents.
    pub fn snapshot(&self) -> String {
        self.text.lock().expect("input buffer mutex poisoned").clone()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text
            .lock()
            .expect("input buffer mutex poisoned")
            .is_empty()
    }

    /// Clear the buffer.
    pub fn clear(&self) {
        self.text.lock().expect("input buffer mutex poisoned").clear();
    }

    /// Append a finalized dictation fragment, joined with a single space.
    ///
    /// Never overwrites existing content; an empty buffer gets no leading
    /// space. Empty fragments are ignored.
    pub fn append_fragment(&self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        let mut guard = self.text.lock().expect("input buffer mutex poisoned");
        if !guard.is_empty() {
            guard.push(' ');
        }
        guard.push_str(fragment);
    }
}

// =============================================================================
// Tests
// =============================================================================
