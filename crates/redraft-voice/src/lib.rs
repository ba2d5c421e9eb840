//! Voice I/O: dictation into the input buffer and single-flight synthesis
//! of text, on independent channels behind pluggable engine traits.

pub mod controller;
pub mod engine;
pub mod error;
pub mod state;

pub use controller::{DictationRun, VoiceController};
pub use engine::{
    SpeechChannel, SpeechRecognizer, SpeechSynthesizer, UnavailableRecognizer,
    UnavailableSynthesizer, Utterance,
};
pub use error::VoiceError;
pub use state::{RecognitionState, SynthesisState};
