//! Opening search result pages.

use std::process::{Child, Command, Stdio};
use thiserror::Error;
use url::Url;

/// Error type for opening a URL
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("no opener command configured")]
    NoOpener,
    #[error("failed to launch {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Opens URLs in a new top-level browsing context
pub trait Navigator {
    fn open(&mut self, url: &Url) -> Result<(), NavigationError>;
}

/// Hands URLs to a desktop opener such as `xdg-open`.
///
/// Spawned openers are kept and reaped once they exit, so finished ones do
/// not linger as zombies.
#[derive(Debug)]
pub struct SystemNavigator {
    program: String,
    args: Vec<String>,
    children: Vec<Child>,
}

impl SystemNavigator {
    /// `command` is split on whitespace; the URL is appended as the last
    /// argument (e.g. "firefox --new-tab").
    pub fn new(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
            children: Vec::new(),
        }
    }

    /// Collect openers that have exited. Returns how many are still running.
    pub fn reap(&mut self) -> usize {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    log::warn!("Opener exited with {}", status);
                }
                false
            }
            Ok(None) => true,
            Err(e) => {
                log::debug!("Failed to poll opener: {}", e);
                false
            }
        });
        self.children.len()
    }
}

impl Navigator for SystemNavigator {
    fn open(&mut self, url: &Url) -> Result<(), NavigationError> {
        if self.program.is_empty() {
            return Err(NavigationError::NoOpener);
        }
        self.reap();

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| NavigationError::Spawn {
                command: self.program.clone(),
                source,
            })?;
        self.children.push(child);

        log::info!("Opened {}", url);
        Ok(())
    }
}
