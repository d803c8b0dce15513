use super::{DocumentView, View};
use crate::favorites::Favorite;
use crate::history::{time_ago, HistoryEntry};
use crate::i18n::{Language, Message};
use crate::launcher::Presentation;
use crate::settings::Settings;
use chrono::{DateTime, Utc};
use std::io::{BufRead, Write};

/// Line-oriented view for a terminal.
///
/// Keeps a [`DocumentView`] in sync so the page can be exported, prints
/// notices and prompts as they happen, and holds the rendered history and
/// favorites until asked to show them.
pub struct TerminalView<R, W> {
    input: R,
    out: W,
    document: DocumentView,
    history: Vec<HistoryEntry>,
    history_language: Language,
    favorite_rows: Vec<String>,
}

impl<R: BufRead, W: Write> TerminalView<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self {
            input,
            out,
            document: DocumentView::new(),
            history: Vec::new(),
            history_language: Language::default(),
            favorite_rows: Vec::new(),
        }
    }

    /// Print a prompt and read one line. None on end of input.
    pub fn read_line(&mut self) -> Option<String> {
        let prompt = if self.document.query.is_empty() {
            format!("[{}] > ", self.document.active_engine)
        } else {
            format!("[{}] {} > ", self.document.active_engine, self.document.query)
        };
        let _ = write!(self.out, "{}", prompt);
        let _ = self.out.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(e) => {
                log::warn!("Failed to read input: {}", e);
                None
            }
        }
    }

    pub fn print(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            log::debug!("Failed to write to terminal: {}", e);
        }
    }

    /// Print the last rendered history with times relative to `now`
    pub fn show_history(&mut self, now: DateTime<Utc>) {
        let language = self.history_language;
        if self.history.is_empty() {
            self.print(&format!("  {}", Message::EmptyHistory.text(language)));
            return;
        }

        let rows: Vec<String> = self
            .history
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "{:>3}. {}  ({} • {})  #{}",
                    i + 1,
                    entry.query,
                    time_ago(entry.timestamp, now, language),
                    entry.engine.name(),
                    entry.id
                )
            })
            .collect();
        for row in rows {
            self.print(&row);
        }
    }

    pub fn show_favorites(&mut self) {
        let rows = self.favorite_rows.clone();
        for row in rows {
            self.print(&row);
        }
    }

    /// Id of the history entry at 1-based `position` in the last rendering
    pub fn history_id(&self, position: usize) -> Option<i64> {
        position
            .checked_sub(1)
            .and_then(|i| self.history.get(i))
            .map(|entry| entry.id)
    }

    /// Values in the open settings editor
    pub fn editor(&self) -> Option<Settings> {
        self.document.settings_editor
    }

    pub fn editor_mut(&mut self) -> Option<&mut Settings> {
        self.document.settings_editor.as_mut()
    }

    pub fn show_editor(&mut self) {
        let Some(settings) = self.document.settings_editor else {
            return;
        };
        let on_off = |b: bool| if b { "on" } else { "off" };
        self.print(&format!("  engine    {}", settings.default_engine));
        self.print(&format!("  history   {}", on_off(settings.save_history)));
        self.print(&format!("  voice     {}", on_off(settings.voice_search)));
        self.print(&format!("  dark      {}", on_off(settings.dark_mode)));
        self.print(&format!("  language  {}", settings.language.tag()));
    }

    pub fn document(&self) -> &DocumentView {
        &self.document
    }
}

impl<R: BufRead, W: Write> View for TerminalView<R, W> {
    fn render_history(&mut self, entries: &[HistoryEntry], language: Language, now: DateTime<Utc>) {
        self.document.render_history(entries, language, now);
        self.history = entries.to_vec();
        self.history_language = language;
    }

    fn render_favorites(&mut self, favorites: &[Favorite], language: Language) {
        self.document.render_favorites(favorites, language);
        self.favorite_rows = favorites
            .iter()
            .map(|f| format!("  {} {}  <{}>", f.icon, f.title, f.url))
            .collect();
        if self.favorite_rows.is_empty() {
            self.favorite_rows
                .push(format!("  {}", Message::EmptyFavorites.text(language)));
        }
    }

    fn apply_presentation(&mut self, presentation: &Presentation) {
        self.document.apply_presentation(presentation);
    }

    fn set_query(&mut self, text: &str) {
        self.document.set_query(text);
    }

    fn show_notice(&mut self, message: &str, now: DateTime<Utc>) {
        self.document.show_notice(message, now);
        self.print(&format!("» {}", message));
    }

    fn set_voice_overlay(&mut self, visible: bool) {
        if visible && !self.document.voice_overlay {
            self.print("🎤 …");
        }
        self.document.set_voice_overlay(visible);
    }

    fn open_settings_editor(&mut self, settings: &Settings) {
        self.document.open_settings_editor(settings);
        self.show_editor();
    }

    fn close_settings_editor(&mut self) {
        self.document.close_settings_editor();
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        let _ = write!(self.out, "{} [y/N] ", prompt);
        let _ = self.out.flush();

        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes" | "نعم" | "ن"
        )
    }
}
