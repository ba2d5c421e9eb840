use thiserror::Error;

use redraft_core::RedraftError;

/// Failures raised by the voice subsystem.
#[derive(Debug, Error)]
pub enum VoiceError {
    /// Speech recognition is not supported in the hosting environment.
    #[error("Speech recognition is not available")]
    RecognitionUnavailable,

    /// Speech synthesis is not supported in the hosting environment.
    #[error("Speech synthesis is not available")]
    SynthesisUnavailable,

    /// `start_dictation` was called while a capture is already running.
    #[error("Dictation is already listening")]
    AlreadyListening,

    /// `speak` was called with nothing to read.
    #[error("Nothing to speak: utterance text is empty")]
    EmptyUtterance,

    #[error(transparent)]
    Core(#[from] RedraftError),
}

impl From<VoiceError> for RedraftError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::RecognitionUnavailable | VoiceError::SynthesisUnavailable => {
                RedraftError::CapabilityUnavailable(err.to_string())
            }
            VoiceError::Core(inner) => inner,
            other => RedraftError::Voice(other.to_string()),
        }
    }
}
