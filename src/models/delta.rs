use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Overall change between the two most recent snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallDelta {
    pub article_count_change: i64,
    /// Change per minute; 0.0 when both snapshots share a timestamp.
    pub article_count_rate_per_min: f64,
    pub current_article_count: usize,
    pub previous_article_count: usize,
}

/// Per-topic change; only topics present in both snapshots get one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicDelta {
    pub article_count_change: i64,
    pub article_count_rate_per_min: f64,
    pub average_sentiment_change: f64,
}

/// Result of comparing the two most recent snapshots for a cache key.
/// A key with no usable history at all yields no report (see the calculator).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeltaReport {
    /// Fewer than two snapshots recorded so far; not an error.
    InsufficientData,
    Ok {
        time_diff_minutes: f64,
        overall: OverallDelta,
        topics: HashMap<String, TopicDelta>,
        snapshots_available: usize,
    },
}
