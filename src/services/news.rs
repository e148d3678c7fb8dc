use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::RawArticle;

/// Configuration for the news provider.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub country: String,
}

impl NewsConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Self {
            api_key: std::env::var("NEWS_API_KEY")
                .map_err(|_| anyhow::anyhow!("NEWS_API_KEY is not set"))?,
            base_url: std::env::var("NEWS_API_URL")
                .unwrap_or_else(|_| "https://newsapi.org/v2".to_string()),
            language: std::env::var("NEWS_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            country: std::env::var("NEWS_COUNTRY").unwrap_or_else(|_| "us".to_string()),
        })
    }
}

/// Boundary to the external news-search provider.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Everything-style search over a boolean-OR keyword query, sorted by
    /// relevancy.
    async fn search(&self, query: &str) -> Result<Vec<RawArticle>, AppError>;

    /// Top headlines for a category.
    async fn top_headlines(&self, category: &str) -> Result<Vec<RawArticle>, AppError>;
}

/// NewsAPI.org provider.
pub struct NewsApiProvider {
    config: NewsConfig,
    client: Client,
}

impl NewsApiProvider {
    pub fn new(config: NewsConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<RawArticle>, AppError> {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .header("X-Api-Key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                error!("News API request failed: {}", e);
                AppError::External(format!("News API error: {}", e))
            })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimited);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("News API error {}: {}", status, body);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: NewsApiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse news response: {}", e);
            AppError::External(format!("Failed to parse news response: {}", e))
        })?;

        let articles: Vec<RawArticle> = parsed
            .articles
            .into_iter()
            .filter_map(|item| {
                // Providers sometimes return removed articles with no title.
                let title = item.title?;
                Some(RawArticle {
                    title,
                    description: item.description,
                    source: item.source.and_then(|s| s.name),
                    url: item.url,
                    published_at: item.published_at,
                })
            })
            .collect();

        info!("Fetched {} articles from {}", articles.len(), endpoint);
        Ok(articles)
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    async fn search(&self, query: &str) -> Result<Vec<RawArticle>, AppError> {
        info!("Searching news for query: {}", query);
        self.fetch(
            "everything",
            &[
                ("q", query),
                ("language", &self.config.language),
                ("sortBy", "relevancy"),
            ],
        )
        .await
    }

    async fn top_headlines(&self, category: &str) -> Result<Vec<RawArticle>, AppError> {
        info!("Fetching top headlines for category: {}", category);
        self.fetch(
            "top-headlines",
            &[("category", category), ("country", &self.config.country)],
        )
        .await
    }
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    source: Option<NewsApiSource>,
    url: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}
