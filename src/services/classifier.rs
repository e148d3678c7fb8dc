use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::{Article, RawArticle, Sentiment};
use crate::services::text::clean_text;

/// One label/score pair as the classification provider returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSentiment {
    pub label: String,
    pub score: f64,
}

/// Boundary to the external sentiment model. Implementations must return one
/// result per input, in input order.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, texts: &[String]) -> Result<Vec<ProviderSentiment>, AppError>;
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl ClassifierConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("CLASSIFIER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8001/classify".to_string()),
            api_key: std::env::var("CLASSIFIER_API_KEY").ok(),
        }
    }
}

/// HTTP-backed classifier (a sentiment model served behind a batch endpoint).
pub struct HttpClassifier {
    config: ClassifierConfig,
    client: Client,
}

impl HttpClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(ClassifierConfig::from_env())
    }
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    texts: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    results: Vec<ProviderSentiment>,
}

#[async_trait]
impl SentimentClassifier for HttpClassifier {
    async fn classify(&self, texts: &[String]) -> Result<Vec<ProviderSentiment>, AppError> {
        info!("Classifying batch of {} texts", texts.len());

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&ClassifyRequest { texts });
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            error!("Classifier request failed: {}", e);
            AppError::External(format!("Classifier error: {}", e))
        })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimited);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Classifier error {}: {}", status, body);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: ClassifyResponse = response.json().await.map_err(|e| {
            error!("Failed to parse classifier response: {}", e);
            AppError::External(format!("Failed to parse classifier response: {}", e))
        })?;

        Ok(parsed.results)
    }
}

/// Map a provider label onto the fixed vocabulary. The model's raw indexed
/// labels (LABEL_0/1/2) and already-spelled-out labels are both accepted;
/// anything else falls back to neutral.
pub fn map_provider_label(label: &str) -> Sentiment {
    match label.to_uppercase().as_str() {
        "LABEL_0" | "NEGATIVE" => Sentiment::Negative,
        "LABEL_1" | "NEUTRAL" => Sentiment::Neutral,
        "LABEL_2" | "POSITIVE" => Sentiment::Positive,
        other => {
            warn!("Unknown classifier label '{}', treating as neutral", other);
            Sentiment::Neutral
        }
    }
}

/// Confidence signed by polarity; neutral articles contribute nothing to
/// averages.
pub fn signed_score(sentiment: Sentiment, score: f64) -> f64 {
    match sentiment {
        Sentiment::Positive => score,
        Sentiment::Negative => -score,
        Sentiment::Neutral => 0.0,
    }
}

/// Text handed to the classifier for one article: cleaned title plus
/// description. Articles that clean down to nothing get the literal
/// placeholder "neutral" so the provider never sees empty input; that biases
/// blank articles toward a NEUTRAL label, which is the intended guess.
pub fn classification_input(article: &RawArticle) -> String {
    let combined = match &article.description {
        Some(description) => format!("{} {}", article.title, description),
        None => article.title.clone(),
    };
    let cleaned = clean_text(&combined);
    if cleaned.is_empty() {
        "neutral".to_string()
    } else {
        cleaned
    }
}

/// Run one batch of raw articles through the classifier and attach the mapped
/// label, confidence and signed score to each.
pub async fn classify_batch(
    classifier: &dyn SentimentClassifier,
    articles: Vec<RawArticle>,
) -> Result<Vec<Article>, AppError> {
    if articles.is_empty() {
        return Ok(Vec::new());
    }

    let inputs: Vec<String> = articles.iter().map(classification_input).collect();
    let sentiments = classifier.classify(&inputs).await?;

    if sentiments.len() != articles.len() {
        return Err(AppError::External(format!(
            "Classifier returned {} results for {} articles",
            sentiments.len(),
            articles.len()
        )));
    }

    let classified = articles
        .into_iter()
        .zip(sentiments)
        .map(|(article, provider)| {
            let sentiment = map_provider_label(&provider.label);
            Article {
                title: article.title,
                description: article.description,
                source: article.source,
                url: article.url,
                published_at: article.published_at,
                sentiment,
                score: provider.score,
                sentiment_score: signed_score(sentiment, provider.score),
            }
        })
        .collect();

    Ok(classified)
}
