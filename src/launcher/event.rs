use crate::config;
use crate::engine::{Engine, SearchType};
use crate::i18n::{Direction, Language, Message};
use crate::settings::Settings;
use crate::voice::{RecognitionEvent, RecognitionOptions};
use url::Url;

/// Input to the launcher: a user action or a collaborator outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The query field changed
    InputChanged(String),
    /// The clear affordance was used
    ClearInput,
    /// Search for `query`
    Search { query: String, search_type: SearchType },
    /// Enter pressed in the query field
    SubmitInput,
    /// A quick action (image, video, news, maps) on the query field
    QuickAction(SearchType),
    SelectEngine(Engine),
    /// A history item was clicked
    HistoryActivated(i64),
    RemoveHistory(i64),
    /// Clear-all was pressed; needs confirmation
    ClearHistoryRequested,
    ClearHistoryConfirmed,
    AddFavorite {
        title: String,
        url: String,
        icon: Option<String>,
    },
    RemoveFavorite(String),
    OpenSettings,
    /// The settings editor was saved with these values
    SaveSettings(Settings),
    CloseSettings,
    ApplySettings,
    StartVoice,
    StopVoice,
    /// A signal from the speech recognizer
    Recognition(RecognitionEvent),
    /// The recognizer refused to start
    VoiceStartFailed(String),
    /// The navigator could not open a URL
    NavigationFailed(String),
}

/// Which stored blob to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Settings,
    History,
    Favorites,
}

impl StoreKey {
    pub fn key(self) -> &'static str {
        match self {
            StoreKey::Settings => config::SETTINGS_KEY,
            StoreKey::History => config::HISTORY_KEY,
            StoreKey::Favorites => config::FAVORITES_KEY,
        }
    }
}

/// Document-level state derived from the settings and the current engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub dark_mode: bool,
    pub active_engine: Engine,
    pub language: Language,
}

impl Presentation {
    pub fn lang(&self) -> &'static str {
        self.language.tag()
    }

    pub fn dir(&self) -> Direction {
        self.language.direction()
    }
}

/// Output of the launcher, applied by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Persist(StoreKey),
    /// Open in a new browsing context
    Navigate(Url),
    Notice(Message),
    RenderHistory,
    RenderFavorites,
    ApplyPresentation(Presentation),
    /// Replace the query field contents
    SetInput(String),
    StartRecognition(RecognitionOptions),
    StopRecognition,
    VoiceOverlay(bool),
    OpenSettingsEditor(Settings),
    CloseSettingsEditor,
    /// Ask the user before clearing history
    ConfirmClearHistory,
}
