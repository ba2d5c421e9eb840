//! Voice controller tying recognition and synthesis to the input buffer.
//!
//! Dictation streams finalized transcript fragments into the shared input
//! buffer (append-only, never overwriting typed text). Synthesis reads a
//! given text aloud on one of two caller-visible channels. The two sides
//! are independent: starting dictation never cancels playback. Within
//! synthesis, utterances are single-flight across both channels.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use redraft_core::config::VoiceConfig;
use redraft_core::InputBuffer;

use crate::engine::{SpeechChannel, SpeechRecognizer, SpeechSynthesizer, Utterance};
use crate::error::VoiceError;
use crate::state::{RecognitionState, SynthesisState};

/// Tracks one active dictation capture.
#[derive(Debug, Clone)]
pub struct DictationRun {
    pub id: Uuid,
    pub started: DateTime<Utc>,
}

impl DictationRun {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started: Utc::now(),
        }
    }

    /// Elapsed duration of this run in seconds.
    pub fn elapsed_secs(&self) -> f32 {
        let elapsed = Utc::now() - self.started;
        elapsed.num_milliseconds() as f32 / 1000.0
    }
}

/// Orchestrates dictation and synthesis against the shared input buffer.
pub struct VoiceController {
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    recognition: Arc<Mutex<RecognitionState>>,
    synthesis: Mutex<SynthesisState>,
    input: InputBuffer,
    config: VoiceConfig,
    run: Arc<Mutex<Option<DictationRun>>>,
    forwarder: Mutex<Option<JoinHandle<()>>>,
    /// Id and channel of the utterance currently playing. A finished
    /// `speak` only settles the channel back to Idle if its utterance is
    /// still the active one; otherwise a newer utterance has taken over.
    active_utterance: Mutex<Option<(Uuid, SpeechChannel)>>,
}

impl VoiceController {
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        input: InputBuffer,
        config: VoiceConfig,
    ) -> Self {
        Self {
            recognizer,
            synthesizer,
            recognition: Arc::new(Mutex::new(RecognitionState::Idle)),
            synthesis: Mutex::new(SynthesisState::Idle),
            input,
            config,
            run: Arc::new(Mutex::new(None)),
            forwarder: Mutex::new(None),
            active_utterance: Mutex::new(None),
        }
    }

    pub fn recognition_state(&self) -> RecognitionState {
        *self.recognition.lock().expect("recognition mutex poisoned")
    }

    pub fn synthesis_state(&self) -> SynthesisState {
        *self.synthesis.lock().expect("synthesis mutex poisoned")
    }

    pub fn is_listening(&self) -> bool {
        self.recognition_state() == RecognitionState::Listening
    }

    pub fn is_speaking(&self) -> bool {
        self.synthesis_state() == SynthesisState::Speaking
    }

    /// The channel whose utterance is currently playing, for rendering the
    /// correct active/stop control.
    pub fn active_channel(&self) -> Option<SpeechChannel> {
        self.active_utterance
            .lock()
            .expect("utterance mutex poisoned")
            .map(|(_, channel)| channel)
    }

    /// Whether speech capture is supported in this environment.
    pub fn recognition_available(&self) -> bool {
        self.recognizer.is_available()
    }

    /// Whether speech playback is supported in this environment.
    pub fn synthesis_available(&self) -> bool {
        self.synthesizer.is_available()
    }

    /// The active dictation run, if any.
    pub fn current_run(&self) -> Option<DictationRun> {
        self.run.lock().expect("run mutex poisoned").clone()
    }

    /// Start dictation in the given locale.
    ///
    /// Finalized transcript fragments arriving from the recognizer are
    /// appended to the input buffer one by one until the capture ends.
    /// Playback, if any, keeps running.
    pub async fn start_dictation(&self, locale: &str) -> Result<(), VoiceError> {
        if !self.recognizer.is_available() {
            return Err(VoiceError::RecognitionUnavailable);
        }
        // Claim the Listening state before touching the engine so two
        // overlapping calls cannot both open a stream. Rolled back below
        // if the engine refuses to start.
        {
            let mut state = self.recognition.lock().expect("recognition mutex poisoned");
            if !state.can_transition_to(&RecognitionState::Listening) {
                return Err(VoiceError::AlreadyListening);
            }
            *state = RecognitionState::Listening;
        }

        let mut rx = match self.recognizer.start(locale).await {
            Ok(rx) => rx,
            Err(e) => {
                *self.recognition.lock().expect("recognition mutex poisoned") =
                    RecognitionState::Idle;
                return Err(e);
            }
        };

        let run = DictationRun::new();
        let run_id = run.id;
        tracing::info!(run_id = %run.id, locale, "Dictation started");
        *self.run.lock().expect("run mutex poisoned") = Some(run);

        // The forwarder owns stream teardown: whether the capture is stopped
        // explicitly or ends on its own, the closed channel lands here and
        // the recognition state settles back to Idle.
        let input = self.input.clone();
        let recognition = Arc::clone(&self.recognition);
        let run_slot = Arc::clone(&self.run);
        let handle = tokio::spawn(async move {
            while let Some(fragment) = rx.recv().await {
                tracing::debug!(len = fragment.len(), "Transcript fragment received");
                input.append_fragment(&fragment);
            }
            let mut slot = run_slot.lock().expect("run mutex poisoned");
            if slot.as_ref().map(|r| r.id) == Some(run_id) {
                if let Some(run) = slot.take() {
                    tracing::info!(
                        run_id = %run.id,
                        elapsed_secs = run.elapsed_secs(),
                        "Dictation ended"
                    );
                }
                *recognition.lock().expect("recognition mutex poisoned") =
                    RecognitionState::Idle;
            }
        });
        *self.forwarder.lock().expect("forwarder mutex poisoned") = Some(handle);
        Ok(())
    }

    /// Stop dictation and wait for the final fragments to land in the input
    /// buffer. No-op when nothing is listening.
    pub async fn stop_dictation(&self) -> Result<(), VoiceError> {
        if !self.is_listening() {
            tracing::debug!("Stop dictation ignored: not listening");
            return Ok(());
        }

        self.recognizer.stop().await?;
        let handle = self
            .forwarder
            .lock()
            .expect("forwarder mutex poisoned")
            .take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        Ok(())
    }

    /// Read `text` aloud on `channel`, resolving when playback finishes or
    /// is cancelled.
    ///
    /// Single-flight across the whole controller: a playing utterance is
    /// cancelled first, regardless of which channel it belongs to.
    pub async fn speak(
        &self,
        text: &str,
        locale: &str,
        channel: SpeechChannel,
    ) -> Result<(), VoiceError> {
        if text.trim().is_empty() {
            return Err(VoiceError::EmptyUtterance);
        }
        if !self.synthesizer.is_available() {
            return Err(VoiceError::SynthesisUnavailable);
        }
        if self.is_speaking() {
            self.stop_speaking().await?;
        }

        *self.synthesis.lock().expect("synthesis mutex poisoned") = SynthesisState::Speaking;
        let utterance = Utterance::new(text, locale, channel, &self.config);
        tracing::info!(
            utterance_id = %utterance.id,
            channel = %channel,
            chars = utterance.text.len(),
            "Synthesis started"
        );
        *self
            .active_utterance
            .lock()
            .expect("utterance mutex poisoned") = Some((utterance.id, channel));

        let result = self.synthesizer.speak(&utterance).await;

        let mut active = self
            .active_utterance
            .lock()
            .expect("utterance mutex poisoned");
        if active.map(|(id, _)| id) == Some(utterance.id) {
            *active = None;
            drop(active);
            *self.synthesis.lock().expect("synthesis mutex poisoned") = SynthesisState::Idle;
            tracing::debug!(utterance_id = %utterance.id, "Synthesis ended");
        }
        result
    }

    /// Cancel all playback unconditionally. No-op when nothing is playing.
    pub async fn stop_speaking(&self) -> Result<(), VoiceError> {
        if !self.is_speaking() {
            return Ok(());
        }

        self.synthesizer.cancel().await?;
        self.active_utterance
            .lock()
            .expect("utterance mutex poisoned")
            .take();
        *self.synthesis.lock().expect("synthesis mutex poisoned") = SynthesisState::Idle;
        tracing::info!("Synthesis cancelled");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
