//! Per-channel voice state machines.
//!
//! Recognition and synthesis are independent channels with their own tiny
//! lifecycles:
//! - Recognition: Idle -> Listening (start), Listening -> Idle (stop, stream
//!   error, or natural end)
//! - Synthesis: Idle -> Speaking (speak), Speaking -> Idle (utterance end or
//!   cancel)
//!
//! Starting recognition never cancels synthesis. Synthesis is single-flight
//! across the whole controller: starting a new utterance cancels the prior
//! one first.

use std::fmt;

/// State of the speech-to-text channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognitionState {
    /// No capture in progress. Ready to start.
    Idle,
    /// Capturing speech and appending transcripts to the input buffer.
    Listening,
}

impl fmt::Display for RecognitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionState::Idle => write!(f, "Idle"),
            RecognitionState::Listening => write!(f, "Listening"),
        }
    }
}

impl RecognitionState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &RecognitionState) -> bool {
        matches!(
            (self, target),
            (RecognitionState::Idle, RecognitionState::Listening)
                | (RecognitionState::Listening, RecognitionState::Idle)
        )
    }
}

/// State of the text-to-speech channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynthesisState {
    /// Nothing playing.
    Idle,
    /// An utterance is playing.
    Speaking,
}

impl fmt::Display for SynthesisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisState::Idle => write!(f, "Idle"),
            SynthesisState::Speaking => write!(f, "Speaking"),
        }
    }
}

impl SynthesisState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SynthesisState) -> bool {
        matches!(
            (self, target),
            (SynthesisState::Idle, SynthesisState::Speaking)
                | (SynthesisState::Speaking, SynthesisState::Idle)
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
