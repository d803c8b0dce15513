//! Recording collaborators shared by controller and front-end tests.

use crate::navigator::{NavigationError, Navigator};
use crate::voice::{RecognitionEvent, RecognitionOptions, SpeechRecognizer, VoiceError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use url::Url;

/// Navigator that records every URL it is asked to open.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub opened: Vec<Url>,
    /// Refuse every request when set
    pub fail: bool,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            opened: Vec::new(),
            fail: true,
        }
    }

    pub fn opened_strings(&self) -> Vec<String> {
        self.opened.iter().map(Url::to_string).collect()
    }
}

impl Navigator for RecordingNavigator {
    fn open(&mut self, url: &Url) -> Result<(), NavigationError> {
        if self.fail {
            return Err(NavigationError::NoOpener);
        }
        self.opened.push(url.clone());
        Ok(())
    }
}

/// What a [`ScriptedRecognizer`] saw and what it will report next.
#[derive(Debug, Default)]
pub struct RecognizerScript {
    pub starts: Vec<RecognitionOptions>,
    pub stops: usize,
    /// Signals handed out by `poll_event`, in order
    pub queued: VecDeque<RecognitionEvent>,
    pub fail_start: bool,
}

/// Recognizer driven by a shared script, so tests can inspect it after
/// handing ownership to a controller.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRecognizer {
    script: Rc<RefCell<RecognizerScript>>,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recognizer that reports `events` once started
    pub fn with_events(events: impl IntoIterator<Item = RecognitionEvent>) -> Self {
        let recognizer = Self::new();
        recognizer.script.borrow_mut().queued.extend(events);
        recognizer
    }

    pub fn script(&self) -> Rc<RefCell<RecognizerScript>> {
        Rc::clone(&self.script)
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn start(&mut self, options: &RecognitionOptions) -> Result<(), VoiceError> {
        let mut script = self.script.borrow_mut();
        if script.fail_start {
            return Err(VoiceError::Busy);
        }
        script.starts.push(options.clone());
        Ok(())
    }

    fn stop(&mut self) {
        self.script.borrow_mut().stops += 1;
    }

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        self.script.borrow_mut().queued.pop_front()
    }
}
