//! Favorite shortcuts shown on the launcher page.

use crate::config;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// A pinned external link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub title: String,
    pub url: String,
    /// A single glyph shown in place of a favicon
    pub icon: String,
}

/// Error type for favorite edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FavoriteError {
    #[error("invalid favorite URL {0:?}")]
    InvalidUrl(String),
    #[error("{0} is already a favorite")]
    Duplicate(String),
}

/// Favorites in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorites {
    items: Vec<Favorite>,
}

impl Default for Favorites {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Favorites {
    /// The built-in shortcuts used when nothing is stored
    pub fn seeded() -> Self {
        let items = config::DEFAULT_FAVORITES
            .iter()
            .map(|(title, url, icon)| Favorite {
                title: title.to_string(),
                url: url.to_string(),
                icon: icon.to_string(),
            })
            .collect();
        Self { items }
    }

    pub fn from_items(items: Vec<Favorite>) -> Self {
        Self { items }
    }

    /// Parse a stored favorites blob. Malformed data yields the seeded set.
    /// Entries that are not http(s) links are dropped.
    pub fn from_json(contents: &str) -> Self {
        match serde_json::from_str::<Vec<Favorite>>(contents) {
            Ok(items) => {
                let items = items
                    .into_iter()
                    .filter(|f| {
                        let keep = web_url(&f.url).is_some();
                        if !keep {
                            log::warn!("Dropping stored favorite with unsupported URL {:?}", f.url);
                        }
                        keep
                    })
                    .collect();
                Self { items }
            }
            Err(e) => {
                log::warn!("Failed to parse stored favorites, using defaults: {}", e);
                Self::seeded()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    /// Append a favorite. The URL must be an absolute http(s) URL not
    /// already present; an empty title falls back to the host name.
    pub fn add(&mut self, title: &str, url: &str, icon: Option<&str>) -> Result<&Favorite, FavoriteError> {
        let parsed = web_url(url).ok_or_else(|| FavoriteError::InvalidUrl(url.to_string()))?;

        let url = url.trim().to_string();
        if self.contains(&url) {
            return Err(FavoriteError::Duplicate(url));
        }

        let title = match title.trim() {
            "" => parsed.host_str().unwrap_or(&url).to_string(),
            t => t.to_string(),
        };
        let icon = icon
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .unwrap_or(config::DEFAULT_FAVORITE_ICON);

        self.items.push(Favorite {
            title,
            url,
            icon: icon.to_string(),
        });
        Ok(&self.items[self.items.len() - 1])
    }

    /// Remove the favorite pointing at `url`. Returns false if none matched.
    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|f| f.url != url.trim());
        self.items.len() != before
    }

    pub fn contains(&self, url: &str) -> bool {
        self.items.iter().any(|f| f.url == url)
    }

    pub fn items(&self) -> &[Favorite] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `url` parsed, if it is an absolute http or https URL
fn web_url(url: &str) -> Option<Url> {
    Url::parse(url.trim())
        .ok()
        .filter(|u| u.scheme() == "http" || u.scheme() == "https")
}
