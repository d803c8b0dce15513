//! Launcher state and its transitions.
//!
//! [`Launcher::handle`] takes one [`Event`] and returns the [`Effect`]s the
//! UI, storage, navigator and recognizer should see. It touches no
//! collaborator itself, which keeps every operation testable in isolation.

mod event;

pub use event::{Effect, Event, Presentation, StoreKey};

use crate::engine::{self, Engine, SearchType};
use crate::favorites::{FavoriteError, Favorites};
use crate::history::SearchHistory;
use crate::i18n::Message;
use crate::settings::Settings;
use crate::storage::Storage;
use crate::voice::{RecognitionEvent, RecognitionOptions, VoiceSession, VoiceState};
use chrono::{DateTime, Utc};

/// The launcher's whole in-memory state
#[derive(Debug)]
pub struct Launcher {
    settings: Settings,
    history: SearchHistory,
    favorites: Favorites,
    engine: Engine,
    input: String,
    voice: VoiceSession,
    voice_available: bool,
    settings_open: bool,
}

impl Launcher {
    pub fn new(
        settings: Settings,
        history: SearchHistory,
        favorites: Favorites,
        voice_available: bool,
    ) -> Self {
        Self {
            engine: settings.default_engine,
            settings,
            history,
            favorites,
            input: String::new(),
            voice: VoiceSession::new(),
            voice_available,
            settings_open: false,
        }
    }

    /// Load state from storage and return the effects that bring the UI in
    /// line with it. Missing or unreadable values fall back to defaults;
    /// favorites seeded this way are persisted right away.
    pub fn load(storage: &dyn Storage, voice_available: bool) -> (Self, Vec<Effect>) {
        let settings = read(storage, StoreKey::Settings)
            .map(|s| Settings::from_json(&s))
            .unwrap_or_default();
        let history = read(storage, StoreKey::History)
            .map(|s| SearchHistory::from_json(&s))
            .unwrap_or_default();

        let mut effects = Vec::new();
        let favorites = match read(storage, StoreKey::Favorites) {
            Some(stored) => Favorites::from_json(&stored),
            None => {
                log::info!("No stored favorites, seeding defaults");
                effects.push(Effect::Persist(StoreKey::Favorites));
                Favorites::seeded()
            }
        };

        log::info!(
            "Loaded {} history entries and {} favorites",
            history.len(),
            favorites.len()
        );

        let mut launcher = Self::new(settings, history, favorites, voice_available);
        launcher.apply_settings(&mut effects);
        effects.push(Effect::RenderHistory);
        effects.push(Effect::RenderFavorites);

        (launcher, effects)
    }

    /// Apply one event
    pub fn handle(&mut self, event: Event, now: DateTime<Utc>) -> Vec<Effect> {
        let mut effects = Vec::new();

        match event {
            Event::InputChanged(text) => {
                self.input = text;
                effects.push(Effect::SetInput(self.input.clone()));
            }
            Event::ClearInput => self.clear_input(&mut effects),
            Event::Search { query, search_type } => {
                self.perform_search(&query, search_type, now, &mut effects)
            }
            Event::SubmitInput => {
                let query = self.input.clone();
                self.perform_search(&query, SearchType::Web, now, &mut effects);
            }
            Event::QuickAction(search_type) => {
                let query = self.input.clone();
                self.perform_search(&query, search_type, now, &mut effects);
            }
            Event::SelectEngine(engine) => {
                self.engine = engine;
                effects.push(Effect::ApplyPresentation(self.presentation()));
            }
            Event::HistoryActivated(id) => {
                if let Some(entry) = self.history.get(id) {
                    let query = entry.query.clone();
                    self.input = query.clone();
                    effects.push(Effect::SetInput(query.clone()));
                    self.perform_search(&query, SearchType::Web, now, &mut effects);
                }
            }
            Event::RemoveHistory(id) => {
                if self.history.remove(id) {
                    effects.push(Effect::Persist(StoreKey::History));
                    effects.push(Effect::RenderHistory);
                } else {
                    log::debug!("No history entry with id {}", id);
                }
            }
            Event::ClearHistoryRequested => effects.push(Effect::ConfirmClearHistory),
            Event::ClearHistoryConfirmed => {
                self.history.clear();
                log::info!("Cleared search history");
                effects.push(Effect::Persist(StoreKey::History));
                effects.push(Effect::RenderHistory);
                effects.push(Effect::Notice(Message::HistoryCleared));
            }
            Event::AddFavorite { title, url, icon } => {
                match self.favorites.add(&title, &url, icon.as_deref()) {
                    Ok(_) => {
                        effects.push(Effect::Persist(StoreKey::Favorites));
                        effects.push(Effect::RenderFavorites);
                        effects.push(Effect::Notice(Message::FavoriteAdded));
                    }
                    Err(e) => {
                        log::debug!("Rejected favorite: {}", e);
                        effects.push(Effect::Notice(match e {
                            FavoriteError::InvalidUrl(_) => Message::FavoriteInvalidUrl,
                            FavoriteError::Duplicate(_) => Message::FavoriteDuplicate,
                        }));
                    }
                }
            }
            Event::RemoveFavorite(url) => {
                if self.favorites.remove(&url) {
                    effects.push(Effect::Persist(StoreKey::Favorites));
                    effects.push(Effect::RenderFavorites);
                    effects.push(Effect::Notice(Message::FavoriteRemoved));
                }
            }
            Event::OpenSettings => {
                self.settings_open = true;
                effects.push(Effect::OpenSettingsEditor(self.settings));
            }
            Event::SaveSettings(settings) => {
                let language_changed = settings.language != self.settings.language;
                self.settings = settings;
                effects.push(Effect::Persist(StoreKey::Settings));
                self.apply_settings(&mut effects);
                if language_changed {
                    effects.push(Effect::RenderHistory);
                    effects.push(Effect::RenderFavorites);
                }
                self.settings_open = false;
                effects.push(Effect::CloseSettingsEditor);
                effects.push(Effect::Notice(Message::SettingsSaved));
            }
            Event::CloseSettings => {
                self.settings_open = false;
                effects.push(Effect::CloseSettingsEditor);
            }
            Event::ApplySettings => self.apply_settings(&mut effects),
            Event::StartVoice => self.start_voice(&mut effects),
            Event::StopVoice => {
                if self.voice.finish() {
                    effects.push(Effect::StopRecognition);
                    effects.push(Effect::VoiceOverlay(false));
                }
            }
            Event::Recognition(signal) => self.on_recognition(signal, now, &mut effects),
            Event::VoiceStartFailed(reason) => {
                if self.voice.finish() {
                    log::warn!("Error starting speech recognition: {}", reason);
                    effects.push(Effect::VoiceOverlay(false));
                    effects.push(Effect::Notice(Message::VoiceStartFailed));
                }
            }
            Event::NavigationFailed(reason) => {
                log::warn!("Navigation failed: {}", reason);
                effects.push(Effect::Notice(Message::NavigationFailed));
            }
        }

        effects
    }

    fn perform_search(
        &mut self,
        query: &str,
        search_type: SearchType,
        now: DateTime<Utc>,
        effects: &mut Vec<Effect>,
    ) {
        let query = query.trim();
        if query.is_empty() {
            effects.push(Effect::Notice(Message::EmptyQuery));
            return;
        }

        if self.settings.save_history {
            self.history.add(query, self.engine, now);
            effects.push(Effect::Persist(StoreKey::History));
            effects.push(Effect::RenderHistory);
        }

        match engine::build_search_url(self.engine, search_type, query) {
            Ok(url) => {
                log::debug!("Searching {} ({}) for {:?}", self.engine, search_type.key(), query);
                effects.push(Effect::Navigate(url));
            }
            Err(e) => {
                log::warn!("Failed to build search URL: {}", e);
                effects.push(Effect::Notice(Message::NavigationFailed));
            }
        }

        self.clear_input(effects);
    }

    fn clear_input(&mut self, effects: &mut Vec<Effect>) {
        self.input.clear();
        effects.push(Effect::SetInput(String::new()));
    }

    /// Re-derive the document state from the settings. The current engine is
    /// reset to the default engine.
    fn apply_settings(&mut self, effects: &mut Vec<Effect>) {
        self.engine = self.settings.default_engine;
        effects.push(Effect::ApplyPresentation(self.presentation()));
    }

    fn start_voice(&mut self, effects: &mut Vec<Effect>) {
        if self.voice.is_listening() {
            log::debug!("Voice session already active, ignoring start request");
            return;
        }
        if !self.settings.voice_search {
            effects.push(Effect::Notice(Message::VoiceDisabled));
            return;
        }
        if !self.voice_available {
            effects.push(Effect::Notice(Message::VoiceUnsupported));
            return;
        }

        self.voice.begin();
        effects.push(Effect::StartRecognition(RecognitionOptions::for_language(
            self.settings.language,
        )));
    }

    fn on_recognition(
        &mut self,
        signal: RecognitionEvent,
        now: DateTime<Utc>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.voice.is_listening() {
            log::debug!("Ignoring {:?} outside a voice session", signal);
            return;
        }

        match signal {
            RecognitionEvent::Started => effects.push(Effect::VoiceOverlay(true)),
            RecognitionEvent::Result(transcript) => {
                self.voice.finish();
                self.input = transcript.clone();
                effects.push(Effect::SetInput(transcript.clone()));
                effects.push(Effect::StopRecognition);
                effects.push(Effect::VoiceOverlay(false));
                self.perform_search(&transcript, SearchType::Web, now, effects);
            }
            RecognitionEvent::Error(code) => {
                self.voice.finish();
                log::warn!("Speech recognition error: {}", code);
                effects.push(Effect::StopRecognition);
                effects.push(Effect::VoiceOverlay(false));
                effects.push(Effect::Notice(Message::VoiceFailed));
            }
            RecognitionEvent::End => {
                self.voice.finish();
                effects.push(Effect::VoiceOverlay(false));
            }
        }
    }

    /// Serialized form of one stored blob
    pub fn snapshot(&self, key: StoreKey) -> Result<String, serde_json::Error> {
        match key {
            StoreKey::Settings => self.settings.to_json(),
            StoreKey::History => self.history.to_json(),
            StoreKey::Favorites => self.favorites.to_json(),
        }
    }

    pub fn presentation(&self) -> Presentation {
        Presentation {
            dark_mode: self.settings.dark_mode,
            active_engine: self.engine,
            language: self.settings.language,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn voice_state(&self) -> VoiceState {
        self.voice.state()
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings_open
    }
}

fn read(storage: &dyn Storage, key: StoreKey) -> Option<String> {
    match storage.get(key.key()) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read {} from storage: {}", key.key(), e);
            None
        }
    }
}
