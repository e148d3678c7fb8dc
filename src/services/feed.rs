use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::errors::AppError;
use crate::models::{AggregatedSummary, Article};
use crate::services::aggregation::{aggregate_by_category, aggregate_by_topics};
use crate::services::classifier::{classify_batch, SentimentClassifier};
use crate::services::news::NewsProvider;
use crate::services::query::TopicQuery;
use crate::services::snapshot_store::SnapshotStore;

/// Response for the topic query flow. Cache hits replay the aggregates of
/// the current snapshot; the article list is only populated on a fresh fetch.
#[derive(Debug, Serialize)]
pub struct TopicFeed {
    pub cache_key: String,
    pub cached: bool,
    pub fetched_at: DateTime<Utc>,
    pub article_count: usize,
    pub articles: Vec<Article>,
    pub aggregated: HashMap<String, AggregatedSummary>,
}

/// Response for the category headline flow (uncached).
#[derive(Debug, Serialize)]
pub struct CategoryFeed {
    pub category: String,
    pub summary: AggregatedSummary,
    pub articles: Vec<Article>,
}

/// Serve a topic query: fresh cache entry wins outright, otherwise run the
/// full fetch -> classify -> aggregate -> record pipeline. Any failure before
/// `record` leaves the cache untouched, so no partial snapshot is ever
/// visible.
pub async fn topic_feed(
    store: &SnapshotStore,
    news: &dyn NewsProvider,
    classifier: &dyn SentimentClassifier,
    raw_topics: &str,
) -> Result<TopicFeed, AppError> {
    if raw_topics.trim().is_empty() {
        return Err(AppError::Validation(
            "at least one topic is required".to_string(),
        ));
    }

    let query = TopicQuery::parse(raw_topics);

    if let Some(snapshot) = store.fresh_snapshot(&query.cache_key) {
        info!("Serving '{}' from cache", query.cache_key);
        return Ok(TopicFeed {
            cache_key: query.cache_key,
            cached: true,
            fetched_at: snapshot.timestamp,
            article_count: snapshot.article_count,
            articles: Vec::new(),
            aggregated: snapshot.aggregated,
        });
    }

    let raw_articles = news.search(&query.query).await?;
    let articles = classify_batch(classifier, raw_articles).await?;
    let aggregated = aggregate_by_topics(&articles, &query.topics);
    let snapshot = store.record(&query.cache_key, articles.len(), aggregated.clone())?;

    Ok(TopicFeed {
        cache_key: query.cache_key,
        cached: false,
        fetched_at: snapshot.timestamp,
        article_count: articles.len(),
        articles,
        aggregated,
    })
}

/// Serve a category headline request: fetch, classify and summarize, no
/// caching involved.
pub async fn category_feed(
    news: &dyn NewsProvider,
    classifier: &dyn SentimentClassifier,
    category: &str,
) -> Result<CategoryFeed, AppError> {
    let category = category.trim().to_lowercase();
    if category.is_empty() {
        return Err(AppError::Validation("category must not be empty".to_string()));
    }

    let raw_articles = news.top_headlines(&category).await?;
    let articles = classify_batch(classifier, raw_articles).await?;
    let summary = aggregate_by_category(&articles);

    Ok(CategoryFeed {
        category,
        summary,
        articles,
    })
}
