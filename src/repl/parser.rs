use crate::engine::{self, Engine, SearchType};
use std::path::PathBuf;
use thiserror::Error;

/// Result of parsing one line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: a web search
    Search(String),
    /// `:image`, `:video`, `:news`, `:maps`. Without a query the input field
    /// is searched.
    Quick {
        search_type: SearchType,
        query: Option<String>,
    },
    /// Put text in the input field
    Type(String),
    ClearInput,
    Engine(Engine),
    History,
    /// Activate the history item at a 1-based position
    Open(usize),
    /// Remove a history entry by id
    Remove(i64),
    ClearHistory,
    Favorites,
    FavoriteAdd {
        url: String,
        title: String,
    },
    FavoriteRemove(String),
    Settings,
    /// Edit a field in the open settings editor
    Set {
        field: String,
        value: String,
    },
    SaveSettings,
    CloseSettings,
    Voice,
    Stop,
    Export(PathBuf),
    Help,
    Quit,
}

/// Error type for terminal input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: :{0}")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("not a number: {0}")]
    InvalidNumber(String),
    #[error(transparent)]
    Parse(#[from] engine::ParseError),
}

/// Parse a line of terminal input
///
/// Lines starting with `:` are commands; anything else, including an empty
/// line, is searched as typed.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let trimmed = line.trim();

    let Some(rest) = trimmed.strip_prefix(':') else {
        return Ok(Command::Search(trimmed.to_string()));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "image" | "images" | "video" | "videos" | "news" | "maps" | "map" => Command::Quick {
            search_type: name.parse()?,
            query: non_empty(args).map(str::to_string),
        },
        "type" => Command::Type(args.to_string()),
        "clear-input" | "clear" => Command::ClearInput,
        "engine" | "e" => Command::Engine(required(args, "engine name")?.parse()?),
        "history" | "h" => Command::History,
        "open" | "o" => Command::Open(number(required(args, "history position")?)?),
        "rm" => Command::Remove(number(required(args, "history id")?)?),
        "clear-history" => Command::ClearHistory,
        "favorites" | "favs" | "f" => Command::Favorites,
        "fav-add" => {
            let args = required(args, "favorite URL")?;
            let (url, title) = match args.split_once(char::is_whitespace) {
                Some((url, title)) => (url, title.trim()),
                None => (args, ""),
            };
            Command::FavoriteAdd {
                url: url.to_string(),
                title: title.to_string(),
            }
        }
        "fav-rm" => Command::FavoriteRemove(required(args, "favorite URL")?.to_string()),
        "settings" | "s" => Command::Settings,
        "set" => {
            let args = required(args, "setting name")?;
            let (field, value) = args
                .split_once(char::is_whitespace)
                .ok_or(CommandError::MissingArgument("setting value"))?;
            Command::Set {
                field: field.to_string(),
                value: value.trim().to_string(),
            }
        }
        "save-settings" | "save" => Command::SaveSettings,
        "close-settings" | "cancel" => Command::CloseSettings,
        "voice" | "v" => Command::Voice,
        "stop" => Command::Stop,
        "export" => Command::Export(PathBuf::from(required(args, "output path")?)),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(command)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn required<'a>(args: &'a str, what: &'static str) -> Result<&'a str, CommandError> {
    non_empty(args).ok_or(CommandError::MissingArgument(what))
}

fn number<T: std::str::FromStr>(s: &str) -> Result<T, CommandError> {
    s.parse()
        .map_err(|_| CommandError::InvalidNumber(s.to_string()))
}
