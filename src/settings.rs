//! User preferences and their stored representation.

use crate::engine::{self, Engine};
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// User preferences. Serialized as a camelCase JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_engine: Engine,
    pub save_history: bool,
    pub voice_search: bool,
    pub dark_mode: bool,
    pub language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_engine: Engine::Google,
            save_history: true,
            voice_search: true,
            dark_mode: false,
            language: Language::Ar,
        }
    }
}

/// Error returned when editing a single settings field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("unknown setting: {0}")]
    UnknownField(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error(transparent)]
    Engine(#[from] engine::ParseError),
}

impl Settings {
    /// Parse a stored settings blob, merging it over the defaults key by key.
    ///
    /// Missing keys and keys whose value does not fit keep their default.
    /// A blob that is not a JSON object yields the defaults.
    pub fn from_json(contents: &str) -> Self {
        let stored = match serde_json::from_str::<Value>(contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                log::warn!("Stored settings are not an object, using defaults");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to parse stored settings, using defaults: {}", e);
                return Self::default();
            }
        };

        let mut merged = match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map,
            _ => return Self::default(),
        };

        for (key, value) in stored {
            if !merged.contains_key(&key) {
                log::debug!("Ignoring unknown settings key {:?}", key);
                continue;
            }

            let mut candidate: Map<String, Value> = merged.clone();
            candidate.insert(key.clone(), value);
            if serde_json::from_value::<Settings>(Value::Object(candidate.clone())).is_ok() {
                merged = candidate;
            } else {
                log::warn!("Invalid stored value for setting {:?}, using default", key);
            }
        }

        serde_json::from_value(Value::Object(merged)).unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Set one field from text, as typed in a settings editor
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), SettingsError> {
        match field {
            "engine" | "defaultEngine" => self.default_engine = value.parse()?,
            "history" | "saveHistory" => self.save_history = parse_bool("saveHistory", value)?,
            "voice" | "voiceSearch" => self.voice_search = parse_bool("voiceSearch", value)?,
            "dark" | "darkMode" => self.dark_mode = parse_bool("darkMode", value)?,
            "language" | "lang" => {
                self.language = match value.trim().to_ascii_lowercase().as_str() {
                    "ar" => Language::Ar,
                    "en" => Language::En,
                    _ => {
                        return Err(SettingsError::InvalidValue {
                            field: "language",
                            value: value.to_string(),
                        })
                    }
                }
            }
            other => return Err(SettingsError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            field,
            value: value.to_string(),
        }),
    }
}
