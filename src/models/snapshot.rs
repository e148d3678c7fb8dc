use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summary statistics for one topic or category.
///
/// Invariant: positive_count + negative_count <= article_count (neutral
/// articles count toward the total only).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregatedSummary {
    pub article_count: usize,
    /// Mean of signed sentiment scores; 0.0 when there are no articles.
    pub average_sentiment: f64,
    pub positive_count: usize,
    pub negative_count: usize,
    /// "Positive" / "Negative" / "Neutral", derived from average_sentiment.
    pub overall_label: String,
}

/// One point-in-time aggregation result for a cache key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub article_count: usize,
    pub aggregated: HashMap<String, AggregatedSummary>,
}

/// Cached state for one cache key: the latest snapshot plus a bounded,
/// oldest-first history. `current` mirrors the last element of `history`
/// whenever the history is non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    #[serde(default)]
    pub current: Option<Snapshot>,
    #[serde(default)]
    pub history: Vec<Snapshot>,
}

/// The whole persisted cache: cache key -> entry.
pub type SentimentCache = HashMap<String, CacheEntry>;
