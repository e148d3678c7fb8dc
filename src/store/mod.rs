mod file;
mod memory;

pub use file::FileCacheStore;
pub use memory::MemoryCacheStore;

use thiserror::Error;

use crate::models::SentimentCache;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence port for the sentiment cache. The whole cache is read and
/// written as a single document.
///
/// `load` never fails: a missing store yields an empty cache and a corrupt
/// one is logged and also yields an empty cache. Write failures do surface.
pub trait CachePersistence: Send + Sync {
    fn load(&self) -> SentimentCache;
    fn save(&self, cache: &SentimentCache) -> Result<(), StoreError>;
}
