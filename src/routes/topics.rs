use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::services::feed::{self, TopicFeed};
use crate::services::query::TopicQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TopicParams {
    /// Comma-separated topic list, e.g. "bitcoin, ai".
    pub q: String,
}

/// GET /api/topics?q=bitcoin,ai
/// Cached topic query: a fresh snapshot is replayed, otherwise the full
/// fetch/classify/aggregate pipeline runs and records a new snapshot.
pub async fn get_topic_feed(
    Query(params): Query<TopicParams>,
    State(state): State<AppState>,
) -> Result<Json<TopicFeed>, AppError> {
    info!("Topic feed requested for '{}'", params.q);

    let feed = feed::topic_feed(
        &state.store,
        state.news_provider.as_ref(),
        state.classifier.as_ref(),
        &params.q,
    )
    .await?;

    info!(
        "Topic feed for '{}': {} articles, cached={}",
        feed.cache_key, feed.article_count, feed.cached
    );
    Ok(Json(feed))
}

/// GET /api/topics/deltas?q=bitcoin,ai
/// Change between the two most recent snapshots for the query's cache key.
/// A key with no recorded history answers with status "no_data" rather than
/// an error.
pub async fn get_topic_deltas(
    Query(params): Query<TopicParams>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    if params.q.trim().is_empty() {
        return Err(AppError::Validation(
            "at least one topic is required".to_string(),
        ));
    }

    let query = TopicQuery::parse(&params.q);
    match state.store.deltas(&query.cache_key) {
        Some(report) => Ok(Json(serde_json::to_value(report).map_err(|e| {
            AppError::External(format!("Failed to serialize delta report: {}", e))
        })?)),
        None => Ok(Json(json!({ "status": "no_data" }))),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_topic_feed))
        .route("/deltas", get(get_topic_deltas))
}
