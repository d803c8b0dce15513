//! Search engines and search URL construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// A supported search engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Google,
    Bing,
    DuckDuckGo,
    Yahoo,
}

/// Kind of results requested from an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchType {
    #[default]
    Web,
    Image,
    Video,
    News,
    Maps,
}

/// Static URL templates for one engine. The encoded query is appended to
/// the template as-is.
#[derive(Debug)]
pub struct EngineDescriptor {
    pub name: &'static str,
    pub web: &'static str,
    pub image: &'static str,
    pub video: &'static str,
    pub news: &'static str,
    pub maps: &'static str,
}

impl EngineDescriptor {
    /// Template prefix for the given search type
    pub fn template(&self, search_type: SearchType) -> &'static str {
        match search_type {
            SearchType::Web => self.web,
            SearchType::Image => self.image,
            SearchType::Video => self.video,
            SearchType::News => self.news,
            SearchType::Maps => self.maps,
        }
    }
}

const GOOGLE: EngineDescriptor = EngineDescriptor {
    name: "Google",
    web: "https://www.google.com/search?q=",
    image: "https://www.google.com/search?tbm=isch&q=",
    video: "https://www.google.com/search?tbm=vid&q=",
    news: "https://news.google.com/search?q=",
    maps: "https://www.google.com/maps/search/",
};

const BING: EngineDescriptor = EngineDescriptor {
    name: "Bing",
    web: "https://www.bing.com/search?q=",
    image: "https://www.bing.com/images/search?q=",
    video: "https://www.bing.com/videos/search?q=",
    news: "https://www.bing.com/news/search?q=",
    maps: "https://www.bing.com/maps?q=",
};

// DuckDuckGo has no per-vertical endpoints that take a plain query
const DUCKDUCKGO: EngineDescriptor = EngineDescriptor {
    name: "DuckDuckGo",
    web: "https://duckduckgo.com/?q=",
    image: "https://duckduckgo.com/?q=",
    video: "https://duckduckgo.com/?q=",
    news: "https://duckduckgo.com/?q=",
    maps: "https://duckduckgo.com/?q=",
};

const YAHOO: EngineDescriptor = EngineDescriptor {
    name: "Yahoo",
    web: "https://search.yahoo.com/search?p=",
    image: "https://images.search.yahoo.com/search/images?p=",
    video: "https://video.search.yahoo.com/search/video?p=",
    news: "https://news.search.yahoo.com/search?p=",
    maps: "https://www.yahoo.com/maps?q=",
};

impl Engine {
    /// All engines, in selector order
    pub const ALL: [Engine; 4] = [Engine::Google, Engine::Bing, Engine::DuckDuckGo, Engine::Yahoo];

    /// Stable identifier used in storage and on the command line
    pub fn key(self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::Bing => "bing",
            Engine::DuckDuckGo => "duckduckgo",
            Engine::Yahoo => "yahoo",
        }
    }

    pub fn descriptor(self) -> &'static EngineDescriptor {
        match self {
            Engine::Google => &GOOGLE,
            Engine::Bing => &BING,
            Engine::DuckDuckGo => &DUCKDUCKGO,
            Engine::Yahoo => &YAHOO,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when parsing an engine key or search type that is not known
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown search engine: {0}")]
    UnknownEngine(String),
    #[error("unknown search type: {0}")]
    UnknownSearchType(String),
}

impl FromStr for Engine {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Engine::ALL
            .into_iter()
            .find(|engine| engine.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownEngine(s.to_string()))
    }
}

impl SearchType {
    /// The quick-action search types (everything but plain web search)
    pub const QUICK_ACTIONS: [SearchType; 4] = [
        SearchType::Image,
        SearchType::Video,
        SearchType::News,
        SearchType::Maps,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SearchType::Web => "web",
            SearchType::Image => "image",
            SearchType::Video => "video",
            SearchType::News => "news",
            SearchType::Maps => "maps",
        }
    }
}

impl FromStr for SearchType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(SearchType::Web),
            "image" | "images" => Ok(SearchType::Image),
            "video" | "videos" => Ok(SearchType::Video),
            "news" => Ok(SearchType::News),
            "maps" | "map" => Ok(SearchType::Maps),
            _ => Err(ParseError::UnknownSearchType(s.to_string())),
        }
    }
}

/// Build the URL for `query` on `engine`, percent-encoding the query and
/// appending it to the engine's template for `search_type`.
pub fn build_search_url(
    engine: Engine,
    search_type: SearchType,
    query: &str,
) -> Result<Url, url::ParseError> {
    let encoded = urlencoding::encode(query);
    let template = engine.descriptor().template(search_type);
    Url::parse(&format!("{}{}", template, encoded))
}
