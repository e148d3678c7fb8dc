use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::services::feed::{self, CategoryFeed};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".to_string()
}

/// GET /news?category=business
/// Top headlines for a category, classified and summarized. Not cached.
pub async fn get_news(
    Query(params): Query<NewsParams>,
    State(state): State<AppState>,
) -> Result<Json<CategoryFeed>, AppError> {
    info!("Fetching category feed for '{}'", params.category);

    let feed = feed::category_feed(
        state.news_provider.as_ref(),
        state.classifier.as_ref(),
        &params.category,
    )
    .await?;

    info!(
        "Category '{}': {} articles, overall {}",
        feed.category, feed.summary.article_count, feed.summary.overall_label
    );
    Ok(Json(feed))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_news))
}
