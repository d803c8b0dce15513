//! The UI surface the controller renders into.

mod document;
pub mod markup;
mod notice;
mod terminal;

pub use document::DocumentView;
pub use notice::NoticeArea;
pub use terminal::TerminalView;

use crate::favorites::Favorite;
use crate::history::HistoryEntry;
use crate::i18n::Language;
use crate::launcher::Presentation;
use crate::settings::Settings;
use chrono::{DateTime, Utc};

/// Renders launcher state and collects answers from the user
pub trait View {
    fn render_history(&mut self, entries: &[HistoryEntry], language: Language, now: DateTime<Utc>);

    fn render_favorites(&mut self, favorites: &[Favorite], language: Language);

    /// Dark mode, active engine indicator, `lang` and `dir`
    fn apply_presentation(&mut self, presentation: &Presentation);

    /// Set the query field; the clear affordance shows when it is non-empty
    fn set_query(&mut self, text: &str);

    /// Show a transient notice, replacing any visible one
    fn show_notice(&mut self, message: &str, now: DateTime<Utc>);

    fn set_voice_overlay(&mut self, visible: bool);

    fn open_settings_editor(&mut self, settings: &Settings);

    fn close_settings_editor(&mut self);

    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str) -> bool;
}
