use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{AggregatedSummary, CacheEntry, DeltaReport, SentimentCache, Snapshot};
use crate::services::delta::calculate_deltas;
use crate::store::CachePersistence;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl_secs: i64,
    pub max_history: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 600,
            max_history: 10,
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_secs: std::env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.ttl_secs),
            max_history: defaults.max_history,
        }
    }
}

/// The persisted snapshot cache. Owns the in-memory copy behind a mutex so
/// the whole read-modify-write-save cycle for a key is serialized, and writes
/// through the injected persistence port after every mutation.
pub struct SnapshotStore {
    cache: Mutex<SentimentCache>,
    persistence: Box<dyn CachePersistence>,
    ttl: Duration,
    max_history: usize,
}

impl SnapshotStore {
    pub fn new(persistence: Box<dyn CachePersistence>, config: CacheConfig) -> Self {
        let cache = persistence.load();
        info!("Loaded sentiment cache with {} entries", cache.len());
        Self {
            cache: Mutex::new(cache),
            persistence,
            ttl: Duration::seconds(config.ttl_secs),
            max_history: config.max_history,
        }
    }

    /// An entry is fresh iff it has a current snapshot strictly younger than
    /// the TTL.
    fn entry_is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        entry
            .current
            .as_ref()
            .map_or(false, |snapshot| now - snapshot.timestamp < self.ttl)
    }

    /// Current snapshot for `key` if it is still within TTL; a hit means the
    /// caller can skip the fetch-and-classify pipeline entirely.
    pub fn fresh_snapshot(&self, key: &str) -> Option<Snapshot> {
        let cache = self.cache.lock();
        let entry = cache.get(key)?;
        if self.entry_is_fresh(entry, Utc::now()) {
            debug!("cache hit for '{}'", key);
            entry.current.clone()
        } else {
            None
        }
    }

    /// Record a new snapshot for `key`: append to history, promote to
    /// current, truncate to the newest `max_history` entries, and persist the
    /// whole cache.
    pub fn record(
        &self,
        key: &str,
        article_count: usize,
        aggregated: HashMap<String, AggregatedSummary>,
    ) -> Result<Snapshot, AppError> {
        let mut cache = self.cache.lock();

        let snapshot = Snapshot {
            timestamp: Utc::now(),
            article_count,
            aggregated,
        };

        let entry = cache.entry(key.to_string()).or_default();
        entry.history.push(snapshot.clone());
        entry.current = Some(snapshot.clone());
        if entry.history.len() > self.max_history {
            let excess = entry.history.len() - self.max_history;
            entry.history.drain(..excess);
        }

        self.persistence.save(&cache)?;
        info!(
            "Recorded snapshot for '{}' ({} articles, {} in history)",
            key,
            article_count,
            cache[key].history.len()
        );
        Ok(snapshot)
    }

    /// Delta report for `key`, or `None` when there is no data yet.
    pub fn deltas(&self, key: &str) -> Option<DeltaReport> {
        let cache = self.cache.lock();
        calculate_deltas(&cache, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCacheStore;
    use std::sync::Arc;

    fn store_with_ttl(ttl_secs: i64) -> (SnapshotStore, Arc<MemoryCacheStore>) {
        let backing = Arc::new(MemoryCacheStore::new());
        let store = SnapshotStore::new(
            Box::new(SharedBacking(backing.clone())),
            CacheConfig {
                ttl_secs,
                max_history: 10,
            },
        );
        (store, backing)
    }

    // Lets tests keep a handle on the backing store the SnapshotStore owns.
    struct SharedBacking(Arc<MemoryCacheStore>);

    impl CachePersistence for SharedBacking {
        fn load(&self) -> SentimentCache {
            self.0.load()
        }
        fn save(&self, cache: &SentimentCache) -> Result<(), crate::store::StoreError> {
            self.0.save(cache)
        }
    }

    #[test]
    fn record_sets_current_to_newest_history_entry() {
        let (store, _) = store_with_ttl(600);
        store.record("k", 3, HashMap::new()).unwrap();
        let snap = store.record("k", 5, HashMap::new()).unwrap();

        let fresh = store.fresh_snapshot("k").unwrap();
        assert_eq!(fresh, snap);
        assert_eq!(fresh.article_count, 5);
    }

    #[test]
    fn history_is_capped_at_ten_newest() {
        let (store, backing) = store_with_ttl(600);
        for i in 0..15 {
            store.record("k", i, HashMap::new()).unwrap();
        }

        let persisted = backing.load();
        let entry = &persisted["k"];
        assert_eq!(entry.history.len(), 10);
        // Oldest dropped first: counts 5..15 survive, in arrival order.
        let counts: Vec<usize> = entry.history.iter().map(|s| s.article_count).collect();
        assert_eq!(counts, (5..15).collect::<Vec<_>>());
        assert_eq!(entry.current.as_ref().unwrap().article_count, 14);
    }

    #[test]
    fn zero_ttl_never_yields_a_hit() {
        let (store, _) = store_with_ttl(0);
        store.record("k", 3, HashMap::new()).unwrap();
        assert!(store.fresh_snapshot("k").is_none());
    }

    #[test]
    fn fresh_snapshot_misses_unknown_keys() {
        let (store, _) = store_with_ttl(600);
        assert!(store.fresh_snapshot("nope").is_none());
    }

    #[test]
    fn every_record_is_persisted() {
        let (store, backing) = store_with_ttl(600);
        store.record("a", 1, HashMap::new()).unwrap();
        store.record("b", 2, HashMap::new()).unwrap();

        let persisted = backing.load();
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted["b"].current.as_ref().unwrap().article_count, 2);
    }

    #[test]
    fn store_reloads_persisted_state_on_startup() {
        let backing = Arc::new(MemoryCacheStore::new());
        {
            let store = SnapshotStore::new(
                Box::new(SharedBacking(backing.clone())),
                CacheConfig::default(),
            );
            store.record("k", 4, HashMap::new()).unwrap();
        }

        let reloaded = SnapshotStore::new(
            Box::new(SharedBacking(backing)),
            CacheConfig::default(),
        );
        assert_eq!(reloaded.fresh_snapshot("k").unwrap().article_count, 4);
    }

    #[test]
    fn deltas_flow_through_to_the_calculator() {
        let (store, _) = store_with_ttl(600);
        assert!(store.deltas("k").is_none());

        store.record("k", 1, HashMap::new()).unwrap();
        assert_eq!(store.deltas("k"), Some(DeltaReport::InsufficientData));

        store.record("k", 2, HashMap::new()).unwrap();
        assert!(matches!(store.deltas("k"), Some(DeltaReport::Ok { .. })));
    }
}
