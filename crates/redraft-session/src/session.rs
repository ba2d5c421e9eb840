//! Revision session state machine.
//!
//! Orchestrates exactly one outstanding AI operation at a time -- either a
//! rewrite in a selected style or a grammar/spelling correction check -- and
//! routes the result into the suggestion store or the diff highlight.
//!
//! Lifecycle per request: Idle -> Pending -> {Succeeded, Failed} -> Idle.
//! `clear` is legal from any state; an in-flight request is tagged with a
//! generation counter and a resolution carrying a stale generation is
//! discarded instead of repopulating the session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex};
use std::time::Duration;

use regex::Regex;

use redraft_core::prompts::{correction_instruction, CORRECTION_SYSTEM_INSTRUCTION};
use redraft_core::{
    style_prompt, CompletionBackend, CompletionRequest, InputBuffer, RedraftConfig, RewriteStyle,
};
use redraft_diff::{compute_diff, render_markup, DiffSegment};

use crate::error::SessionError;
use crate::store::{Clipboard, SuggestionStore};

/// Leading list numbering such as `1. ` on a suggestion line.
static NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("invalid numbering regex"));

/// Operational state of the revision session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No request outstanding. Ready to submit.
    Idle,
    /// A completion request is in flight.
    Pending,
    /// The request resolved successfully (transient).
    Succeeded,
    /// The request failed (transient).
    Failed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Pending => write!(f, "Pending"),
            SessionState::Succeeded => write!(f, "Succeeded"),
            SessionState::Failed => write!(f, "Failed"),
        }
    }
}

impl SessionState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Idle, SessionState::Pending)
                | (SessionState::Pending, SessionState::Succeeded)
                | (SessionState::Pending, SessionState::Failed)
                | (SessionState::Succeeded, SessionState::Idle)
                | (SessionState::Failed, SessionState::Idle)
                // Stale-resolution path: a cleared request unwinds directly.
                | (SessionState::Pending, SessionState::Idle)
        )
    }
}

/// Rendered correction result.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Highlight {
    pub segments: Vec<DiffSegment>,
    pub markup: String,
}

/// Owned session object: single source of truth for the input buffer, the
/// suggestion store, the highlight, and the loading state.
pub struct RevisionSession {
    backend: Arc<dyn CompletionBackend>,
    input: InputBuffer,
    store: SuggestionStore,
    state: Mutex<SessionState>,
    highlight: Mutex<Option<Highlight>>,
    selected_style: Mutex<RewriteStyle>,
    /// Bumped by `clear`; a resolution whose captured generation no longer
    /// matches is discarded.
    generation: AtomicU64,
    model: String,
    suggestion_count: usize,
}

impl RevisionSession {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        clipboard: Arc<dyn Clipboard>,
        config: &RedraftConfig,
    ) -> Self {
        Self {
            backend,
            input: InputBuffer::new(),
            store: SuggestionStore::new(
                clipboard,
                Duration::from_millis(config.suggestions.copied_reset_ms),
            ),
            state: Mutex::new(SessionState::Idle),
            highlight: Mutex::new(None),
            selected_style: Mutex::new(RewriteStyle::Improve),
            generation: AtomicU64::new(0),
            model: config.completion.model.clone(),
            suggestion_count: config.suggestions.count.clamp(1, 3),
        }
    }

    /// The input buffer. The session owns it; the voice controller may hold a
    /// clone but only ever appends.
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// The suggestion store.
    pub fn store(&self) -> &SuggestionStore {
        &self.store
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        *self.state.lock().expect("state mutex poisoned")
    }

    /// Whether a request is in flight (the loading indicator).
    pub fn is_pending(&self) -> bool {
        self.state() == SessionState::Pending
    }

    /// The current correction highlight, if any.
    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight.lock().expect("highlight mutex poisoned").clone()
    }

    /// The currently selected rewrite style.
    pub fn selected_style(&self) -> RewriteStyle {
        *self.selected_style.lock().expect("style mutex poisoned")
    }

    /// Submit a rewrite request in the given style.
    ///
    /// Preconditions: input non-empty, no request already pending. On success
    /// the parsed suggestions replace the store contents; on failure the
    /// prior suggestions are left untouched and the error is returned.
    pub async fn submit_rewrite(&self, style: RewriteStyle) -> Result<(), SessionError> {
        let text = self.input.snapshot();
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let generation = self.begin_request()?;
        *self.selected_style.lock().expect("style mutex poisoned") = style;

        let prompt = style_prompt(style);
        let request = CompletionRequest::new(
            &self.model,
            prompt.system_instruction,
            &prompt.user_instruction(self.suggestion_count, &text),
        );

        let started = chrono::Utc::now();
        let result = self.backend.complete(&request).await;
        let elapsed_ms = (chrono::Utc::now() - started).num_milliseconds();

        if self.resolution_is_stale(generation) {
            return Ok(());
        }

        match result {
            Ok(raw) => {
                let suggestions = parse_suggestions(&raw, self.suggestion_count);
                tracing::info!(
                    style = %style,
                    count = suggestions.len(),
                    elapsed_ms,
                    "Rewrite completed"
                );
                self.store.replace_all(suggestions);
                self.finish_request(SessionState::Succeeded);
                Ok(())
            }
            Err(e) => {
                tracing::error!(style = %style, elapsed_ms, error = %e, "Rewrite failed");
                self.finish_request(SessionState::Failed);
                Err(SessionError::Core(e))
            }
        }
    }

    /// Submit a grammar/spelling correction check.
    ///
    /// On success the highlight is replaced with a word-level diff of the
    /// original against the corrected text; the suggestion store is not
    /// touched. On failure the highlight is cleared.
    pub async fn submit_correction_check(&self) -> Result<(), SessionError> {
        let original = self.input.snapshot();
        if original.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let generation = self.begin_request()?;

        let request = CompletionRequest::new(
            &self.model,
            CORRECTION_SYSTEM_INSTRUCTION,
            &correction_instruction(&original),
        );

        let started = chrono::Utc::now();
        let result = self.backend.complete(&request).await;
        let elapsed_ms = (chrono::Utc::now() - started).num_milliseconds();

        if self.resolution_is_stale(generation) {
            return Ok(());
        }

        match result {
            Ok(raw) => {
                let corrected = strip_wrapping_quotes(raw.trim());
                let segments = compute_diff(&original, corrected);
                let markup = render_markup(&segments);
                tracing::info!(
                    segments = segments.len(),
                    elapsed_ms,
                    "Correction check completed"
                );
                *self.highlight.lock().expect("highlight mutex poisoned") =
                    Some(Highlight { segments, markup });
                self.finish_request(SessionState::Succeeded);
                Ok(())
            }
            Err(e) => {
                tracing::error!(elapsed_ms, error = %e, "Correction check failed");
                *self.highlight.lock().expect("highlight mutex poisoned") = None;
                self.finish_request(SessionState::Failed);
                Err(SessionError::Core(e))
            }
        }
    }

    /// Select a rewrite style.
    ///
    /// When a rewrite result is already visible this re-triggers
    /// `submit_rewrite` with the new style -- a deliberate coupling between
    /// style selection and execution, not a side-effect-free setter.
    pub async fn set_style(&self, style: RewriteStyle) -> Result<(), SessionError> {
        let retrigger = {
            let mut selected = self.selected_style.lock().expect("style mutex poisoned");
            *selected = style;
            !self.store.is_empty()
        };
        if retrigger {
            self.submit_rewrite(style).await
        } else {
            Ok(())
        }
    }

    /// Reset input, suggestions, and highlight unconditionally.
    ///
    /// Legal from any state. An in-flight request keeps running, but its
    /// eventual resolution carries a stale generation and is discarded.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.input.clear();
        self.store.clear();
        *self.highlight.lock().expect("highlight mutex poisoned") = None;
        tracing::debug!("Session cleared");
    }

    /// Discard the highlight only (the "delete highlight" control).
    pub fn clear_highlight(&self) {
        *self.highlight.lock().expect("highlight mutex poisoned") = None;
    }

    // -- Private helpers --

    /// Transition Idle -> Pending, rejecting a second submit while Pending.
    ///
    /// Returns the generation the request is tagged with.
    fn begin_request(&self) -> Result<u64, SessionError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if *state == SessionState::Pending {
            tracing::debug!("Submit rejected: request already in flight");
            return Err(SessionError::RequestInFlight);
        }
        debug_assert!(state.can_transition_to(&SessionState::Pending));
        *state = SessionState::Pending;
        Ok(self.generation.load(Ordering::SeqCst))
    }

    /// Check whether the session was cleared while the request was in
    /// flight; if so, unwind Pending -> Idle and report the result stale.
    fn resolution_is_stale(&self, generation: u64) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            let mut state = self.state.lock().expect("state mutex poisoned");
            if *state == SessionState::Pending {
                *state = SessionState::Idle;
            }
            tracing::debug!(generation, "Discarding stale completion result");
            true
        } else {
            false
        }
    }

    /// Pass through the transient outcome state and settle back to Idle.
    fn finish_request(&self, outcome: SessionState) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        debug_assert!(state.can_transition_to(&outcome));
        tracing::debug!("Session state: {} -> {} -> Idle", *state, outcome);
        *state = SessionState::Idle;
    }
}

/// Strip one pair of wrapping double quotes, if present.
///
/// Cosmetic normalization only; interior content is never altered.
fn strip_wrapping_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Parse a raw completion into suggestion texts.
///
/// Splits on newlines, drops blank lines, strips leading list numbering and
/// wrapping quotes, and truncates to `count`.
fn parse_suggestions(raw: &str, count: usize) -> Vec<String> {
    raw.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let line = NUMBERING.replace(line, "");
            strip_wrapping_quotes(&line).to_string()
        })
        .take(count)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
