use crate::config;
use chrono::{DateTime, Duration, Utc};

/// The transient notice slot. A newer notice replaces the text and restarts
/// the dismissal window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeArea {
    current: Option<(String, DateTime<Utc>)>,
}

impl NoticeArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: &str, now: DateTime<Utc>) {
        self.current = Some((message.to_string(), now));
    }

    /// The notice visible at `now`, if it has not been dismissed yet
    pub fn visible(&self, now: DateTime<Utc>) -> Option<&str> {
        let (message, shown_at) = self.current.as_ref()?;
        let duration = Duration::milliseconds(config::NOTICE_DURATION_MS as i64);
        if now < *shown_at + duration {
            Some(message.as_str())
        } else {
            None
        }
    }

    /// Last notice shown, dismissed or not
    pub fn last(&self) -> Option<&str> {
        self.current.as_ref().map(|(message, _)| message.as_str())
    }
}
