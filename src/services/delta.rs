use std::collections::HashMap;

use crate::models::{DeltaReport, OverallDelta, SentimentCache, Snapshot, TopicDelta};

/// Compare the two most recent snapshots for a cache key.
///
/// Returns `None` when the key is unknown or has no history at all ("no data
/// yet"), `InsufficientData` with a single snapshot, and a full report
/// otherwise. Never divides by zero: a zero time difference yields a rate
/// of 0.
pub fn calculate_deltas(cache: &SentimentCache, cache_key: &str) -> Option<DeltaReport> {
    let entry = cache.get(cache_key)?;
    let history = &entry.history;
    if history.is_empty() {
        return None;
    }
    if history.len() < 2 {
        return Some(DeltaReport::InsufficientData);
    }

    let current = &history[history.len() - 1];
    let previous = &history[history.len() - 2];

    let time_diff_minutes =
        (current.timestamp - previous.timestamp).num_milliseconds() as f64 / 60_000.0;

    let overall_change = current.article_count as i64 - previous.article_count as i64;

    Some(DeltaReport::Ok {
        time_diff_minutes,
        overall: OverallDelta {
            article_count_change: overall_change,
            article_count_rate_per_min: rate_per_min(overall_change, time_diff_minutes),
            current_article_count: current.article_count,
            previous_article_count: previous.article_count,
        },
        topics: topic_deltas(current, previous, time_diff_minutes),
        snapshots_available: history.len(),
    })
}

fn rate_per_min(change: i64, time_diff_minutes: f64) -> f64 {
    if time_diff_minutes > 0.0 {
        change as f64 / time_diff_minutes
    } else {
        0.0
    }
}

/// Topics present in only one of the two snapshots are silently omitted.
fn topic_deltas(
    current: &Snapshot,
    previous: &Snapshot,
    time_diff_minutes: f64,
) -> HashMap<String, TopicDelta> {
    current
        .aggregated
        .iter()
        .filter_map(|(topic, curr)| {
            let prev = previous.aggregated.get(topic)?;
            let change = curr.article_count as i64 - prev.article_count as i64;
            Some((
                topic.clone(),
                TopicDelta {
                    article_count_change: change,
                    article_count_rate_per_min: rate_per_min(change, time_diff_minutes),
                    average_sentiment_change: curr.average_sentiment - prev.average_sentiment,
                },
            ))
        })
        .collect()
}
