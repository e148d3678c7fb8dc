use std::path::PathBuf;

use tracing::warn;

use crate::models::SentimentCache;
use crate::store::{CachePersistence, StoreError};

/// JSON file backing for the sentiment cache.
pub struct FileCacheStore {
    path: PathBuf,
}

impl FileCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        let path = std::env::var("CACHE_FILE").unwrap_or_else(|_| "sentiment_cache.json".to_string());
        Self::new(path)
    }
}

impl CachePersistence for FileCacheStore {
    fn load(&self) -> SentimentCache {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return SentimentCache::new(),
            Err(e) => {
                warn!("could not read cache file {}: {}", self.path.display(), e);
                return SentimentCache::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(
                    "corrupt cache file {}, starting with an empty cache: {}",
                    self.path.display(),
                    e
                );
                SentimentCache::new()
            }
        }
    }

    /// Whole-document replace: write to a temp file, then rename over the
    /// old one so a crash mid-write never leaves a torn store.
    fn save(&self, cache: &SentimentCache) -> Result<(), StoreError> {
        let json = serde_json::to_string(cache)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CacheEntry, Snapshot};
    use chrono::Utc;
    use std::collections::HashMap;

    fn snapshot(count: usize) -> Snapshot {
        Snapshot {
            timestamp: Utc::now(),
            article_count: count,
            aggregated: HashMap::new(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path().join("nope.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{not valid json").unwrap();

        let store = FileCacheStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path().join("cache.json"));

        let mut cache = SentimentCache::new();
        let snap = snapshot(7);
        cache.insert(
            "bitcoin or ai".to_string(),
            CacheEntry {
                current: Some(snap.clone()),
                history: vec![snapshot(3), snap],
            },
        );

        store.save(&cache).unwrap();
        let loaded = store.load();
        assert_eq!(loaded, cache);
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path().join("cache.json"));

        let mut first = SentimentCache::new();
        first.insert("old".to_string(), CacheEntry::default());
        store.save(&first).unwrap();

        let second = SentimentCache::new();
        store.save(&second).unwrap();
        assert!(store.load().is_empty());
    }
}
