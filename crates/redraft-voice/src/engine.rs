//! Speech engine boundary traits.
//!
//! The controller talks to recognition and synthesis through these traits so
//! the hosting environment can plug in whatever engines it has. Availability
//! is probed per engine at call time, never cached at startup; an
//! environment without one reports it and the controller surfaces a
//! capability error instead of entering the lifecycle.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use redraft_core::config::VoiceConfig;

use crate::error::VoiceError;

/// Which caller-visible control an utterance belongs to, so the UI can
/// render the correct active/stop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeechChannel {
    /// Reading the main input text.
    Main,
    /// Reading a rewrite/correction result.
    Result,
}

impl fmt::Display for SpeechChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechChannel::Main => write!(f, "main"),
            SpeechChannel::Result => write!(f, "result"),
        }
    }
}

/// One piece of text queued for synthesis, with its delivery parameters.
///
/// Rate and pitch are fixed defaults from configuration, not per-utterance
/// knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: Uuid,
    pub text: String,
    pub locale: String,
    pub channel: SpeechChannel,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: &str, locale: &str, channel: SpeechChannel, config: &VoiceConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            locale: locale.to_string(),
            channel,
            rate: config.rate,
            pitch: config.pitch,
        }
    }
}

/// Continuous speech-to-text capture.
///
/// `start` opens a capture session and returns the channel on which
/// finalized transcript fragments arrive. The engine closes the channel
/// when the stream ends, whether stopped explicitly or ended naturally.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Whether recognition is supported in this environment.
    fn is_available(&self) -> bool;

    /// Begin capturing in the given locale.
    async fn start(&self, locale: &str) -> Result<mpsc::Receiver<String>, VoiceError>;

    /// End the capture session. The transcript channel closes afterwards.
    async fn stop(&self) -> Result<(), VoiceError>;
}

/// Text-to-speech playback.
///
/// `speak` resolves when playback finishes or is cancelled; `cancel`
/// interrupts an in-progress utterance.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Whether synthesis is supported in this environment.
    fn is_available(&self) -> bool;

    /// Play the utterance to completion.
    async fn speak(&self, utterance: &Utterance) -> Result<(), VoiceError>;

    /// Interrupt the current utterance, if any.
    async fn cancel(&self) -> Result<(), VoiceError>;
}

/// Recognizer for environments without speech capture.
pub struct UnavailableRecognizer;

#[async_trait]
impl SpeechRecognizer for UnavailableRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn start(&self, _locale: &str) -> Result<mpsc::Receiver<String>, VoiceError> {
        Err(VoiceError::RecognitionUnavailable)
    }

    async fn stop(&self) -> Result<(), VoiceError> {
        Err(VoiceError::RecognitionUnavailable)
    }
}

/// Synthesizer for environments without speech playback.
pub struct UnavailableSynthesizer;

#[async_trait]
impl SpeechSynthesizer for UnavailableSynthesizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn speak(&self, _utterance: &Utterance) -> Result<(), VoiceError> {
        Err(VoiceError::SynthesisUnavailable)
    }

    async fn cancel(&self) -> Result<(), VoiceError> {
        Err(VoiceError::SynthesisUnavailable)
    }
}
