use super::markup::{self, escape_html};
use super::{NoticeArea, View};
use crate::engine::Engine;
use crate::favorites::Favorite;
use crate::history::HistoryEntry;
use crate::i18n::{Direction, Language};
use crate::launcher::Presentation;
use crate::settings::Settings;
use chrono::{DateTime, Utc};

/// In-memory model of the launcher page.
///
/// Holds what a browser document would show (body classes, `lang`/`dir`,
/// rendered fragments, the notice slot, overlays) and renders it as a full
/// HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    pub dark_mode: bool,
    pub lang: &'static str,
    pub dir: Direction,
    pub active_engine: Engine,
    pub query: String,
    pub clear_visible: bool,
    pub history_html: String,
    pub favorites_html: String,
    pub notice: NoticeArea,
    pub voice_overlay: bool,
    pub settings_editor: Option<Settings>,
    /// Answer given to confirmation prompts
    pub confirm_answer: bool,
    /// Prompts asked so far
    pub prompts: Vec<String>,
}

impl Default for DocumentView {
    fn default() -> Self {
        Self {
            dark_mode: false,
            lang: Language::default().tag(),
            dir: Language::default().direction(),
            active_engine: Engine::default(),
            query: String::new(),
            clear_visible: false,
            history_html: String::new(),
            favorites_html: String::new(),
            notice: NoticeArea::new(),
            voice_overlay: false,
            settings_editor: None,
            confirm_answer: true,
            prompts: Vec::new(),
        }
    }
}

impl DocumentView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole page as a standalone HTML document
    pub fn page_html(&self, now: DateTime<Utc>) -> String {
        let body_class = if self.dark_mode { r#" class="dark-mode""# } else { "" };
        let toast = match self.notice.visible(now) {
            Some(message) => format!(
                r#"<div id="toast" class="toast visible"><span id="toastMessage">{}</span></div>"#,
                escape_html(message)
            ),
            None => r#"<div id="toast" class="toast"><span id="toastMessage"></span></div>"#.to_string(),
        };

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n");
        html.push_str(&format!(
            r#"<html lang="{}" dir="{}">"#,
            self.lang,
            self.dir.as_str()
        ));
        html.push_str(r#"<head><meta charset="utf-8"><title>bahth</title></head>"#);
        html.push_str(&format!("<body{}>", body_class));
        html.push_str(&format!(
            r#"<input id="searchInput" type="search" value="{}">"#,
            escape_html(&self.query)
        ));
        html.push_str(&format!(
            r#"<div class="engine-selector">{}</div>"#,
            markup::render_engine_selector(self.active_engine)
        ));
        html.push_str(&format!(
            r#"<section id="favoritesGrid" class="favorites-grid">{}</section>"#,
            self.favorites_html
        ));
        html.push_str(&format!(
            r#"<section id="historyList" class="history-list">{}</section>"#,
            self.history_html
        ));
        html.push_str(&toast);
        html.push_str("</body></html>\n");
        html
    }
}

impl View for DocumentView {
    fn render_history(&mut self, entries: &[HistoryEntry], language: Language, now: DateTime<Utc>) {
        self.history_html = markup::render_history(entries, language, now);
    }

    fn render_favorites(&mut self, favorites: &[Favorite], language: Language) {
        self.favorites_html = markup::render_favorites(favorites, language);
    }

    fn apply_presentation(&mut self, presentation: &Presentation) {
        self.dark_mode = presentation.dark_mode;
        self.active_engine = presentation.active_engine;
        self.lang = presentation.lang();
        self.dir = presentation.dir();
    }

    fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
        self.clear_visible = !text.is_empty();
    }

    fn show_notice(&mut self, message: &str, now: DateTime<Utc>) {
        self.notice.show(message, now);
    }

    fn set_voice_overlay(&mut self, visible: bool) {
        self.voice_overlay = visible;
    }

    fn open_settings_editor(&mut self, settings: &Settings) {
        self.settings_editor = Some(*settings);
    }

    fn close_settings_editor(&mut self) {
        self.settings_editor = None;
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }
}
