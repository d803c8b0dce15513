use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application name
pub const APP_NAME: &str = "bahth";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runtime configuration filename (inside the config directory)
pub const CONFIG_FILE: &str = "config.toml";

/// Key-value database filename (inside the data directory)
pub const STORAGE_DB: &str = "bahth.db";

/// Command used to open URLs when none is configured
pub const DEFAULT_OPENER: &str = "xdg-open";

// ============================================================================
// Storage keys
// ============================================================================

/// Settings blob (JSON object)
pub const SETTINGS_KEY: &str = "searchAgentSettings";

/// History blob (JSON array, newest first)
pub const HISTORY_KEY: &str = "searchHistory";

/// Favorites blob (JSON array)
pub const FAVORITES_KEY: &str = "searchFavorites";

// ============================================================================
// History
// ============================================================================

/// Maximum number of history entries kept
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Relative time thresholds in seconds
pub const MINUTE_SECS: i64 = 60;
pub const HOUR_SECS: i64 = 3_600;
pub const DAY_SECS: i64 = 86_400;
pub const WEEK_SECS: i64 = 604_800;

// ============================================================================
// Notices
// ============================================================================

/// How long a notice stays visible (milliseconds)
pub const NOTICE_DURATION_MS: u64 = 3_000;

// ============================================================================
// Favorites
// ============================================================================

/// Favorites seeded when nothing is stored: (title, url, icon)
pub const DEFAULT_FAVORITES: &[(&str, &str, &str)] = &[
    ("YouTube", "https://www.youtube.com", "🎥"),
    ("Wikipedia", "https://www.wikipedia.org", "📚"),
    ("Twitter", "https://twitter.com", "🐦"),
    ("Reddit", "https://www.reddit.com", "🤖"),
    ("GitHub", "https://github.com", "💻"),
    ("Stack Overflow", "https://stackoverflow.com", "📝"),
];

/// Icon used for favorites added without one
pub const DEFAULT_FAVORITE_ICON: &str = "⭐";

// ============================================================================
// Runtime configuration
// ============================================================================

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no home directory found")]
    NoHome,
}

/// User configuration read from `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
    /// Command used to open URLs (e.g. "firefox")
    pub opener: Option<String>,
    /// Speech-to-text command as argv; the locale is appended as last argument
    pub voice_command: Option<Vec<String>>,
}

impl AppConfig {
    /// Load from the platform config directory, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let dirs = project_dirs()?;
        Self::load_from(&dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Directory holding the key-value database
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }

    /// Command used to open URLs
    pub fn opener(&self) -> &str {
        self.opener.as_deref().unwrap_or(DEFAULT_OPENER)
    }
}

fn project_dirs() -> Result<directories::ProjectDirs, ConfigError> {
    directories::ProjectDirs::from("dev", "myyc", APP_NAME).ok_or(ConfigError::NoHome)
}
