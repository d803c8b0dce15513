//! Binds the launcher to its collaborators.
//!
//! Every user action goes through [`Controller::dispatch`]: the launcher
//! computes the effects, the controller applies them to storage, view,
//! navigator and recognizer, and feeds collaborator outcomes (a refused
//! recognizer, a failed navigation, a confirmation answer) back in as events.

use crate::engine::{Engine, SearchType};
use crate::i18n::{Language, Message};
use crate::launcher::{Effect, Event, Launcher, StoreKey};
use crate::navigator::Navigator;
use crate::settings::Settings;
use crate::storage::Storage;
use crate::view::View;
use crate::voice::{SpeechRecognizer, VoiceState};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

pub struct Controller<S, V, N> {
    launcher: Launcher,
    storage: S,
    view: V,
    navigator: N,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
}

impl<S: Storage, V: View, N: Navigator> Controller<S, V, N> {
    /// Load state from `storage` and render it into `view`.
    /// Voice search is reported unsupported when `recognizer` is None.
    pub fn new(
        storage: S,
        view: V,
        navigator: N,
        recognizer: Option<Box<dyn SpeechRecognizer>>,
    ) -> Self {
        let (launcher, effects) = Launcher::load(&storage, recognizer.is_some());
        let mut controller = Self {
            launcher,
            storage,
            view,
            navigator,
            recognizer,
        };
        controller.apply(effects, Utc::now());
        controller
    }

    pub fn dispatch(&mut self, event: Event) {
        self.dispatch_at(event, Utc::now());
    }

    /// Dispatch with an explicit clock
    pub fn dispatch_at(&mut self, event: Event, now: DateTime<Utc>) {
        log::trace!("Dispatching {:?}", event);
        let effects = self.launcher.handle(event, now);
        self.apply(effects, now);
    }

    fn apply(&mut self, effects: Vec<Effect>, now: DateTime<Utc>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            if let Some(event) = self.apply_one(effect, now) {
                // Follow-up effects run before the rest of the batch
                let follow_up = self.launcher.handle(event, now);
                for effect in follow_up.into_iter().rev() {
                    queue.push_front(effect);
                }
            }
        }
    }

    /// Apply one effect, returning the collaborator outcome that needs to go
    /// back to the launcher, if any.
    fn apply_one(&mut self, effect: Effect, now: DateTime<Utc>) -> Option<Event> {
        let language = self.language();

        match effect {
            Effect::Persist(key) => self.persist(key),
            Effect::Navigate(url) => {
                if let Err(e) = self.navigator.open(&url) {
                    return Some(Event::NavigationFailed(e.to_string()));
                }
            }
            Effect::Notice(message) => self.view.show_notice(message.text(language), now),
            Effect::RenderHistory => {
                self.view
                    .render_history(self.launcher.history().entries(), language, now)
            }
            Effect::RenderFavorites => self
                .view
                .render_favorites(self.launcher.favorites().items(), language),
            Effect::ApplyPresentation(presentation) => self.view.apply_presentation(&presentation),
            Effect::SetInput(text) => self.view.set_query(&text),
            Effect::StartRecognition(options) => {
                let Some(recognizer) = self.recognizer.as_mut() else {
                    return Some(Event::VoiceStartFailed("no recognizer".to_string()));
                };
                if let Err(e) = recognizer.start(&options) {
                    return Some(Event::VoiceStartFailed(e.to_string()));
                }
            }
            Effect::StopRecognition => {
                if let Some(recognizer) = self.recognizer.as_mut() {
                    recognizer.stop();
                }
            }
            Effect::VoiceOverlay(visible) => self.view.set_voice_overlay(visible),
            Effect::OpenSettingsEditor(settings) => self.view.open_settings_editor(&settings),
            Effect::CloseSettingsEditor => self.view.close_settings_editor(),
            Effect::ConfirmClearHistory => {
                if self.view.confirm(Message::ConfirmClearHistory.text(language)) {
                    return Some(Event::ClearHistoryConfirmed);
                }
                log::debug!("Clearing history declined");
            }
        }

        None
    }

    fn persist(&mut self, key: StoreKey) {
        let json = match self.launcher.snapshot(key) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize {}: {}", key.key(), e);
                return;
            }
        };
        if let Err(e) = self.storage.set(key.key(), &json) {
            log::warn!("Failed to save {}: {}", key.key(), e);
        }
    }

    /// Deliver recognizer signals until the voice session is over or the
    /// recognizer has nothing more to report.
    pub fn pump_voice(&mut self) {
        while self.launcher.voice_state() == VoiceState::Listening {
            let Some(signal) = self.recognizer.as_mut().and_then(|r| r.poll_event()) else {
                break;
            };
            self.dispatch(Event::Recognition(signal));
        }
    }

    fn language(&self) -> Language {
        self.launcher.settings().language
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    pub fn perform_search(&mut self, query: &str, search_type: SearchType) {
        self.dispatch(Event::Search {
            query: query.to_string(),
            search_type,
        });
    }

    /// Quick action: search the current input field contents
    pub fn perform_special_search(&mut self, search_type: SearchType) {
        self.dispatch(Event::QuickAction(search_type));
    }

    pub fn submit_input(&mut self) {
        self.dispatch(Event::SubmitInput);
    }

    pub fn set_input(&mut self, text: &str) {
        self.dispatch(Event::InputChanged(text.to_string()));
    }

    pub fn clear_input(&mut self) {
        self.dispatch(Event::ClearInput);
    }

    pub fn select_engine(&mut self, engine: Engine) {
        self.dispatch(Event::SelectEngine(engine));
    }

    pub fn start_voice_search(&mut self) {
        self.dispatch(Event::StartVoice);
    }

    pub fn stop_voice_search(&mut self) {
        self.dispatch(Event::StopVoice);
    }

    pub fn activate_history(&mut self, id: i64) {
        self.dispatch(Event::HistoryActivated(id));
    }

    pub fn remove_from_history(&mut self, id: i64) {
        self.dispatch(Event::RemoveHistory(id));
    }

    /// Clear history after asking the view for confirmation
    pub fn clear_history(&mut self) {
        self.dispatch(Event::ClearHistoryRequested);
    }

    pub fn add_favorite(&mut self, title: &str, url: &str, icon: Option<&str>) {
        self.dispatch(Event::AddFavorite {
            title: title.to_string(),
            url: url.to_string(),
            icon: icon.map(str::to_string),
        });
    }

    pub fn remove_favorite(&mut self, url: &str) {
        self.dispatch(Event::RemoveFavorite(url.to_string()));
    }

    pub fn open_settings(&mut self) {
        self.dispatch(Event::OpenSettings);
    }

    pub fn save_settings(&mut self, settings: Settings) {
        self.dispatch(Event::SaveSettings(settings));
    }

    pub fn close_settings(&mut self) {
        self.dispatch(Event::CloseSettings);
    }

    pub fn apply_settings(&mut self) {
        self.dispatch(Event::ApplySettings);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::storage::MemoryStorage;
    use crate::testing::{RecordingNavigator, ScriptedRecognizer};
    use crate::view::DocumentView;
    use crate::voice::RecognitionEvent;
    use chrono::TimeZone;

    type TestController = Controller<MemoryStorage, DocumentView, RecordingNavigator>;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    fn controller(storage: MemoryStorage) -> TestController {
        Controller::new(storage, DocumentView::new(), RecordingNavigator::new(), None)
    }

    fn english() -> MemoryStorage {
        MemoryStorage::with_values([(config::SETTINGS_KEY, r#"{"language":"en"}"#)])
    }

    fn stored(controller: &TestController, key: &str) -> Option<String> {
        controller.storage().get(key).unwrap()
    }

    #[test]
    fn test_startup_seeds_and_renders() {
        let controller = controller(MemoryStorage::new());

        let favorites = stored(&controller, config::FAVORITES_KEY).unwrap();
        assert!(favorites.contains("https://www.youtube.com"));
        assert!(controller.view().favorites_html.contains("Wikipedia"));
        assert!(controller.view().history_html.contains("empty-state"));
        assert_eq!(controller.view().lang, "ar");
        // Settings are only written once saved
        assert_eq!(stored(&controller, config::SETTINGS_KEY), None);
    }

    #[test]
    fn test_search_navigates_and_records() {
        let mut controller = controller(english());
        controller.dispatch_at(
            Event::Search {
                query: "  cats ".to_string(),
                search_type: SearchType::Image,
            },
            now(),
        );

        assert_eq!(
            controller.navigator().opened_strings(),
            vec!["https://www.google.com/search?tbm=isch&q=cats"]
        );
        let history = stored(&controller, config::HISTORY_KEY).unwrap();
        assert!(history.contains(r#""query":"cats""#));
        assert!(controller.view().history_html.contains("cats"));
        assert_eq!(controller.view().query, "");
    }

    #[test]
    fn test_empty_search_shows_one_notice() {
        let mut controller = controller(english());
        controller.dispatch_at(
            Event::Search {
                query: "   ".to_string(),
                search_type: SearchType::Web,
            },
            now(),
        );

        assert!(controller.navigator().opened.is_empty());
        assert_eq!(stored(&controller, config::HISTORY_KEY), None);
        assert_eq!(
            controller.view().notice.visible(now()),
            Some("Please enter a search term")
        );
    }

    #[test]
    fn test_quick_action_reads_input_field() {
        let mut controller = controller(english());
        controller.select_engine(Engine::Bing);
        controller.set_input("rust");
        assert!(controller.view().clear_visible);

        controller.perform_special_search(SearchType::News);
        assert_eq!(
            controller.navigator().opened_strings(),
            vec!["https://www.bing.com/news/search?q=rust"]
        );
        assert!(!controller.view().clear_visible);
    }

    #[test]
    fn test_apply_settings_is_idempotent() {
        let mut controller = controller(english());
        controller.select_engine(Engine::Yahoo);

        controller.apply_settings();
        let once = controller.view().clone();
        controller.apply_settings();

        assert_eq!(controller.view(), &once);
        assert_eq!(once.active_engine, Engine::Google);
        assert_eq!(once.lang, "en");
    }

    #[test]
    fn test_settings_round_trip_through_storage() {
        let mut controller = controller(MemoryStorage::new());
        controller.open_settings();
        assert!(controller.view().settings_editor.is_some());

        let settings = Settings {
            default_engine: Engine::DuckDuckGo,
            save_history: false,
            voice_search: false,
            dark_mode: true,
            language: crate::i18n::Language::En,
        };
        controller.save_settings(settings);

        assert!(controller.view().settings_editor.is_none());
        assert!(controller.view().dark_mode);
        assert_eq!(controller.view().notice.last(), Some("Settings saved"));

        let storage = controller.storage().clone();
        let reloaded = Controller::new(storage, DocumentView::new(), RecordingNavigator::new(), None);
        assert_eq!(reloaded.launcher().settings(), &settings);
        assert_eq!(reloaded.launcher().engine(), Engine::DuckDuckGo);
        assert_eq!(reloaded.view().dir.as_str(), "ltr");
    }

    #[test]
    fn test_history_not_saved_when_disabled() {
        let storage = MemoryStorage::with_values([(
            config::SETTINGS_KEY,
            r#"{"saveHistory":false,"language":"en"}"#,
        )]);
        let mut controller = controller(storage);
        controller.perform_search("cats", SearchType::Web);

        assert_eq!(controller.navigator().opened.len(), 1);
        assert!(controller.launcher().history().is_empty());
        assert_eq!(stored(&controller, config::HISTORY_KEY), None);
    }

    #[test]
    fn test_clear_history_declined_and_confirmed() {
        let mut controller = controller(english());
        controller.perform_search("cats", SearchType::Web);

        controller.view_mut().confirm_answer = false;
        controller.clear_history();
        assert_eq!(controller.launcher().history().len(), 1);
        assert_eq!(
            controller.view().prompts,
            vec!["Clear the whole search history?"]
        );

        controller.view_mut().confirm_answer = true;
        controller.clear_history();
        assert!(controller.launcher().history().is_empty());
        assert_eq!(stored(&controller, config::HISTORY_KEY).as_deref(), Some("[]"));
        assert_eq!(controller.view().notice.last(), Some("Search history cleared"));
    }

    #[test]
    fn test_activate_and_remove_history() {
        let mut controller = controller(english());
        controller.dispatch_at(
            Event::Search {
                query: "weather".to_string(),
                search_type: SearchType::Web,
            },
            now(),
        );
        let id = controller.launcher().history().entries()[0].id;

        controller.select_engine(Engine::Bing);
        controller.activate_history(id);
        assert_eq!(
            controller.navigator().opened_strings()[1],
            "https://www.bing.com/search?q=weather"
        );

        let latest = controller.launcher().history().entries()[0].id;
        controller.remove_from_history(latest);
        assert!(controller.launcher().history().is_empty());
        controller.remove_from_history(latest);
        assert!(controller.launcher().history().is_empty());
    }

    #[test]
    fn test_navigation_failure_shows_notice() {
        let mut controller = Controller::new(
            english(),
            DocumentView::new(),
            RecordingNavigator::failing(),
            None,
        );
        controller.perform_search("cats", SearchType::Web);

        assert_eq!(controller.launcher().history().len(), 1);
        assert_eq!(
            controller.view().notice.last(),
            Some("Could not open the search page")
        );
    }

    #[test]
    fn test_voice_without_recognizer_is_unsupported() {
        let mut controller = controller(english());
        controller.start_voice_search();

        assert_eq!(controller.launcher().voice_state(), VoiceState::Idle);
        assert_eq!(
            controller.view().notice.last(),
            Some("Voice search is not supported here")
        );
    }

    #[test]
    fn test_voice_transcript_runs_search() {
        let recognizer = ScriptedRecognizer::with_events([
            RecognitionEvent::Started,
            RecognitionEvent::Result("weather".to_string()),
            RecognitionEvent::End,
        ]);
        let script = recognizer.script();
        let mut controller = Controller::new(
            english(),
            DocumentView::new(),
            RecordingNavigator::new(),
            Some(Box::new(recognizer)),
        );

        controller.start_voice_search();
        assert_eq!(controller.launcher().voice_state(), VoiceState::Listening);
        assert_eq!(script.borrow().starts[0].locale, "en-US");

        controller.pump_voice();
        assert_eq!(controller.launcher().voice_state(), VoiceState::Idle);
        assert!(!controller.view().voice_overlay);
        assert_eq!(script.borrow().stops, 1);
        assert_eq!(
            controller.navigator().opened_strings(),
            vec!["https://www.google.com/search?q=weather"]
        );
    }

    #[test]
    fn test_voice_start_failure() {
        let recognizer = ScriptedRecognizer::new();
        recognizer.script().borrow_mut().fail_start = true;
        let mut controller = Controller::new(
            english(),
            DocumentView::new(),
            RecordingNavigator::new(),
            Some(Box::new(recognizer)),
        );

        controller.start_voice_search();
        assert_eq!(controller.launcher().voice_state(), VoiceState::Idle);
        assert_eq!(
            controller.view().notice.last(),
            Some("Could not start voice search")
        );
    }

    #[test]
    fn test_voice_error_and_stop() {
        let recognizer = ScriptedRecognizer::with_events([
            RecognitionEvent::Started,
            RecognitionEvent::Error("no-speech".to_string()),
        ]);
        let script = recognizer.script();
        let mut controller = Controller::new(
            english(),
            DocumentView::new(),
            RecordingNavigator::new(),
            Some(Box::new(recognizer)),
        );

        controller.start_voice_search();
        controller.pump_voice();
        assert_eq!(controller.view().notice.last(), Some("Voice search failed"));
        assert!(controller.navigator().opened.is_empty());

        controller.stop_voice_search();
        assert_eq!(script.borrow().stops, 1);
    }

    #[test]
    fn test_favorites() {
        let mut controller = controller(english());
        controller.add_favorite("Docs", "https://docs.rs", None);
        assert!(controller.view().favorites_html.contains("Docs"));
        assert!(stored(&controller, config::FAVORITES_KEY)
            .unwrap()
            .contains("https://docs.rs"));

        controller.add_favorite("Bad", "javascript:alert(1)", None);
        assert_eq!(controller.view().notice.last(), Some("Invalid link"));

        controller.remove_favorite("https://docs.rs");
        assert!(!controller.view().favorites_html.contains("Docs"));
    }
}
