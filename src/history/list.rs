use crate::config;
use crate::engine::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single past search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation time in milliseconds since the epoch, unique within the list
    pub id: i64,
    pub query: String,
    pub engine: Engine,
    pub timestamp: DateTime<Utc>,
}

/// Search history, newest first, unique by query and bounded by
/// [`config::MAX_HISTORY_ENTRIES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, dropping later duplicates and anything
    /// past the size limit.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            if history.entries.len() >= config::MAX_HISTORY_ENTRIES {
                break;
            }
            if !history.entries.iter().any(|e| e.query == entry.query) {
                history.entries.push(entry);
            }
        }
        history
    }

    /// Parse a stored history blob. Malformed data yields an empty history.
    pub fn from_json(contents: &str) -> Self {
        match serde_json::from_str::<Vec<HistoryEntry>>(contents) {
            Ok(entries) => Self::from_entries(entries),
            Err(e) => {
                log::warn!("Failed to parse stored history, starting empty: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Record a search. An existing entry with the same query is removed
    /// first, the new entry goes to the front and the oldest entries past
    /// the limit are dropped.
    pub fn add(&mut self, query: &str, engine: Engine, now: DateTime<Utc>) -> &HistoryEntry {
        let mut id = now.timestamp_millis();
        if let Some(max_id) = self.entries.iter().map(|e| e.id).max() {
            if max_id >= id {
                id = match max_id.checked_add(1) {
                    Some(next) => next,
                    None => self.unused_id(id),
                };
            }
        }

        self.entries.retain(|e| e.query != query);
        self.entries.insert(
            0,
            HistoryEntry {
                id,
                query: query.to_string(),
                engine,
                timestamp: now,
            },
        );
        self.entries.truncate(config::MAX_HISTORY_ENTRIES);

        &self.entries[0]
    }

    /// First id at or after `start` that no entry uses, wrapping around
    fn unused_id(&self, start: i64) -> i64 {
        let mut id = start;
        while self.entries.iter().any(|e| e.id == id) {
            id = id.wrapping_add(1);
        }
        id
    }

    /// Remove the entry with `id`. Returns false if there was none.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_add_prepends() {
        let mut history = SearchHistory::new();
        history.add("rust", Engine::Google, at(0));
        history.add("gtk", Engine::Bing, at(1));

        let queries: Vec<_> = history.entries().iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["gtk", "rust"]);
        assert_eq!(history.entries()[0].engine, Engine::Bing);
    }

    #[test]
    fn test_duplicate_moves_to_front() {
        let mut history = SearchHistory::new();
        history.add("a", Engine::Google, at(0));
        history.add("b", Engine::Google, at(1));
        history.add("c", Engine::Google, at(2));
        history.add("a", Engine::Yahoo, at(3));

        assert_eq!(history.len(), 3);
        assert_eq!(history.entries()[0].query, "a");
        assert_eq!(history.entries()[0].engine, Engine::Yahoo);
        assert_eq!(history.entries()[0].timestamp, at(3));
    }

    #[test]
    fn test_capacity_and_uniqueness() {
        let mut history = SearchHistory::new();
        for i in 0..120 {
            history.add(&format!("q{}", i % 70), Engine::Google, at(i));
            assert!(history.len() <= config::MAX_HISTORY_ENTRIES);
        }

        assert_eq!(history.len(), config::MAX_HISTORY_ENTRIES);
        let mut queries: Vec<_> = history.entries().iter().map(|e| e.query.clone()).collect();
        queries.sort();
        queries.dedup();
        assert_eq!(queries.len(), config::MAX_HISTORY_ENTRIES);
        assert_eq!(history.entries()[0].query, "q49");
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut history = SearchHistory::new();
        let a = history.add("a", Engine::Google, at(0)).id;
        let b = history.add("b", Engine::Google, at(0)).id;
        assert_ne!(a, b);
        assert_eq!(a, at(0).timestamp_millis());
    }

    #[test]
    fn test_remove() {
        let mut history = SearchHistory::new();
        let id = history.add("a", Engine::Google, at(0)).id;
        history.add("b", Engine::Google, at(1));

        assert!(history.remove(id));
        assert_eq!(history.len(), 1);
        assert!(history.get(id).is_none());
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut history = SearchHistory::new();
        history.add("a", Engine::Google, at(0));
        let before = history.clone();

        assert!(!history.remove(42));
        assert_eq!(history, before);
    }

    #[test]
    fn test_json_round_trip() {
        let mut history = SearchHistory::new();
        history.add("a", Engine::DuckDuckGo, at(0) + Duration::milliseconds(250));
        history.add("b", Engine::Google, at(5));

        let json = history.to_json().unwrap();
        assert_eq!(SearchHistory::from_json(&json), history);
    }

    #[test]
    fn test_reads_browser_iso_timestamps() {
        let json = r#"[{"id":1700000000000,"query":"cats","engine":"google","timestamp":"2023-11-14T22:13:20.000Z"}]"#;
        let history = SearchHistory::from_json(json);
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].timestamp, at(0));
    }

    #[test]
    fn test_malformed_json_gives_empty() {
        assert!(SearchHistory::from_json("{oops").is_empty());
        assert!(SearchHistory::from_json(r#"{"query":"x"}"#).is_empty());
    }

    #[test]
    fn test_from_entries_normalizes() {
        let entry = |id: i64, query: &str| HistoryEntry {
            id,
            query: query.to_string(),
            engine: Engine::Google,
            timestamp: at(id),
        };
        let mut stored: Vec<_> = (0..60).map(|i| entry(i, &format!("q{}", i))).collect();
        stored.insert(1, entry(99, "q0"));

        let history = SearchHistory::from_entries(stored);
        assert_eq!(history.len(), config::MAX_HISTORY_ENTRIES);
        assert_eq!(history.entries()[0].id, 0);
        assert_eq!(history.entries().iter().filter(|e| e.query == "q0").count(), 1);
    }

    #[test]
    fn test_add_after_largest_possible_id() {
        let json = r#"[{"id":9223372036854775807,"query":"x","engine":"bing","timestamp":"2023-11-14T22:13:20Z"}]"#;
        let mut history = SearchHistory::from_json(json);
        assert_eq!(history.len(), 1);

        let id = history.add("y", Engine::Google, at(0)).id;
        assert_eq!(id, at(0).timestamp_millis());

        let again = history.add("z", Engine::Google, at(0)).id;
        assert_ne!(again, id);
        assert_ne!(again, i64::MAX);
        assert_eq!(history.len(), 3);
    }
}
