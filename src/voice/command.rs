use super::{RecognitionEvent, RecognitionOptions, SpeechRecognizer, VoiceError};
use std::collections::VecDeque;
use std::process::{Child, Command, Stdio};

/// Recognizer backed by an external speech-to-text command.
///
/// The command is run once per session with the locale appended as its last
/// argument. Its trimmed stdout is the transcript; a failing exit status or
/// empty output is reported as an error. [`SpeechRecognizer::poll_event`]
/// blocks until the command exits.
#[derive(Debug)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
    pending: VecDeque<RecognitionEvent>,
}

impl CommandRecognizer {
    /// Build from an argv list. Returns None for an empty list.
    pub fn new(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            child: None,
            pending: VecDeque::new(),
        })
    }

    fn collect(&mut self, child: Child) {
        match child.wait_with_output() {
            Ok(output) if output.status.success() => {
                let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if transcript.is_empty() {
                    self.pending.push_back(RecognitionEvent::Error("no-speech".to_string()));
                } else {
                    log::debug!("Recognized {:?}", transcript);
                    self.pending.push_back(RecognitionEvent::Result(transcript));
                }
            }
            Ok(output) => {
                log::warn!("{} exited with {}", self.program, output.status);
                self.pending
                    .push_back(RecognitionEvent::Error(format!("exit status {}", output.status)));
            }
            Err(e) => {
                log::warn!("Failed to read from {}: {}", self.program, e);
                self.pending
                    .push_back(RecognitionEvent::Error("audio-capture".to_string()));
            }
        }
        self.pending.push_back(RecognitionEvent::End);
    }
}

impl SpeechRecognizer for CommandRecognizer {
    fn start(&mut self, options: &RecognitionOptions) -> Result<(), VoiceError> {
        if self.child.is_some() {
            return Err(VoiceError::Busy);
        }

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(options.locale)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| VoiceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        log::info!("Voice session started with {} ({})", self.program, options.locale);

        self.pending.clear();
        self.pending.push_back(RecognitionEvent::Started);
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        self.pending.clear();
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                log::debug!("Voice command already gone: {}", e);
            }
            let _ = child.wait();
            log::info!("Voice session stopped");
        }
    }

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let child = self.child.take()?;
        self.collect(child);
        self.pending.pop_front()
    }
}
