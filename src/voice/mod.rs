//! Voice input: the session state machine and the recognizer seam.
//!
//! A recognizer runs at most one session at a time. Its session signals
//! (started, final result, error, end) are pulled with
//! [`SpeechRecognizer::poll_event`] and fed to the launcher as events, so
//! they never run concurrently with other launcher logic.

mod command;

pub use command::CommandRecognizer;

use crate::i18n::Language;
use thiserror::Error;

/// Parameters for one recognition session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOptions {
    pub locale: &'static str,
    pub continuous: bool,
    pub interim_results: bool,
}

impl RecognitionOptions {
    /// Single-shot, final-results-only session in the locale for `language`
    pub fn for_language(language: Language) -> Self {
        Self {
            locale: language.speech_locale(),
            continuous: false,
            interim_results: false,
        }
    }
}

/// Signals emitted by a recognizer during a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Started,
    /// Final transcript
    Result(String),
    /// Recognition failed with an error code
    Error(String),
    /// The session is over
    End,
}

/// Error type for starting a recognition session
#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("a recognition session is already running")]
    Busy,
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Host speech-to-text capability
pub trait SpeechRecognizer {
    /// Begin a session
    fn start(&mut self, options: &RecognitionOptions) -> Result<(), VoiceError>;

    /// Abort the running session, if any. Safe to call when idle.
    fn stop(&mut self);

    /// Next pending session signal. `None` when there is nothing more to
    /// report for now.
    fn poll_event(&mut self) -> Option<RecognitionEvent>;
}

/// Voice session state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
}

/// Tracks whether a recognition session is active
#[derive(Debug, Default)]
pub struct VoiceSession {
    state: VoiceState,
}

impl VoiceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == VoiceState::Listening
    }

    /// Idle -> Listening. Returns false when a session is already active.
    pub fn begin(&mut self) -> bool {
        if self.is_listening() {
            return false;
        }
        self.state = VoiceState::Listening;
        true
    }

    /// Listening -> Idle. Returns false when already idle.
    pub fn finish(&mut self) -> bool {
        if !self.is_listening() {
            return false;
        }
        self.state = VoiceState::Idle;
        true
    }
}
