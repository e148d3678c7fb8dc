use parking_lot::Mutex;

use crate::models::SentimentCache;
use crate::store::{CachePersistence, StoreError};

/// In-memory backing, used in tests and when no durable store is wanted.
#[derive(Default)]
pub struct MemoryCacheStore {
    inner: Mutex<SentimentCache>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CachePersistence for MemoryCacheStore {
    fn load(&self) -> SentimentCache {
        self.inner.lock().clone()
    }

    fn save(&self, cache: &SentimentCache) -> Result<(), StoreError> {
        *self.inner.lock() = cache.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CacheEntry;

    #[test]
    fn starts_empty_and_round_trips() {
        let store = MemoryCacheStore::new();
        assert!(store.load().is_empty());

        let mut cache = SentimentCache::new();
        cache.insert("tech".to_string(), CacheEntry::default());
        store.save(&cache).unwrap();
        assert_eq!(store.load(), cache);
    }
}
