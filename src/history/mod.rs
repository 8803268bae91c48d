//! Recent-search history: the five most recently looked-up usernames,
//! most-recent-first, persisted across restarts.
//!
//! Persistence sits behind the `HistoryStore` trait so the list logic stays
//! independent of where the entries land (a JSON file in production, an
//! in-memory vector under test).

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

use crate::error::Result;

pub trait HistoryStore: Send + Sync {
    /// Read the persisted list. Missing or unparsable state yields an empty
    /// list rather than an error.
    fn load(&self) -> Vec<String>;

    /// Persist the full list, replacing whatever was stored before.
    fn save(&self, entries: &[String]) -> Result<()>;
}

/// File-backed store: a single JSON-encoded array of usernames.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Vec<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(
                    "Ignoring unparsable search history at {:?}: {}",
                    self.path, e
                );
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(entries)
            .map_err(|e| crate::Error::Internal(format!("Failed to encode history: {e}")))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Volatile store for ephemeral runs and tests.
pub struct MemoryStore {
    entries: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Vec<String> {
        self.entries.lock().expect("history lock poisoned").clone()
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        *self.entries.lock().expect("history lock poisoned") = entries.to_vec();
        Ok(())
    }
}

/// The ordered list of recent distinct usernames.
pub struct RecentSearches {
    entries: Vec<String>,
    limit: usize,
    store: Box<dyn HistoryStore>,
}

impl RecentSearches {
    /// Load the persisted list at startup, clipped to `limit`.
    pub fn load(store: Box<dyn HistoryStore>, limit: usize) -> Self {
        let mut entries = store.load();
        entries.truncate(limit);
        Self {
            entries,
            limit,
            store,
        }
    }

    /// Record a search: drop any existing occurrence (case-sensitive exact
    /// match), prepend, clip to the limit, persist.
    pub fn record(&mut self, username: &str) -> Result<()> {
        self.entries.retain(|entry| entry != username);
        self.entries.insert(0, username.to_string());
        self.entries.truncate(self.limit);
        self.store.save(&self.entries)
    }

    /// Re-save the current list, proving the store is writable.
    pub fn persist(&self) -> Result<()> {
        self.store.save(&self.entries)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recent(limit: usize) -> RecentSearches {
        RecentSearches::load(Box::new(MemoryStore::new()), limit)
    }

    #[test]
    fn insert_prepends_most_recent() {
        let mut searches = recent(5);
        searches.record("octocat").unwrap();
        searches.record("torvalds").unwrap();

        assert_eq!(searches.entries(), ["torvalds", "octocat"]);
    }

    #[test]
    fn reinsert_moves_to_front_without_growing() {
        let mut searches = recent(5);
        for name in ["a", "b", "c"] {
            searches.record(name).unwrap();
        }
        searches.record("a").unwrap();

        assert_eq!(searches.entries(), ["a", "c", "b"]);
        assert_eq!(searches.entries().len(), 3);
    }

    #[test]
    fn six_inserts_evict_the_oldest() {
        let mut searches = recent(5);
        for name in ["u1", "u2", "u3", "u4", "u5", "u6"] {
            searches.record(name).unwrap();
        }

        assert_eq!(searches.entries(), ["u6", "u5", "u4", "u3", "u2"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut searches = recent(5);
        searches.record("Octocat").unwrap();
        searches.record("octocat").unwrap();

        assert_eq!(searches.entries(), ["octocat", "Octocat"]);
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_searches.json");

        {
            let store = JsonFileStore::new(path.clone());
            let mut searches = RecentSearches::load(Box::new(store), 5);
            searches.record("octocat").unwrap();
            searches.record("torvalds").unwrap();
        }

        let reloaded = RecentSearches::load(Box::new(JsonFileStore::new(path)), 5);
        assert_eq!(reloaded.entries(), ["torvalds", "octocat"]);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        let searches = RecentSearches::load(Box::new(store), 5);
        assert!(searches.entries().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_searches.json");
        fs::write(&path, "{not json").unwrap();

        let searches = RecentSearches::load(Box::new(JsonFileStore::new(path)), 5);
        assert!(searches.entries().is_empty());
    }

    #[test]
    fn load_clips_oversized_persisted_lists() {
        let store = MemoryStore::new();
        store
            .save(&["a", "b", "c", "d", "e", "f", "g"].map(String::from))
            .unwrap();

        let searches = RecentSearches::load(Box::new(store), 5);
        assert_eq!(searches.entries().len(), 5);
        assert_eq!(searches.entries()[0], "a");
    }
}
