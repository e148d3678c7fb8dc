use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed three-way sentiment vocabulary. Provider-specific labels are mapped
/// into this set by the classifier adapter before anything downstream sees them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "POSITIVE"),
            Sentiment::Neutral => write!(f, "NEUTRAL"),
            Sentiment::Negative => write!(f, "NEGATIVE"),
        }
    }
}

/// Article as returned by the news provider, before classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// A classified article. Immutable for the rest of the request cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub sentiment: Sentiment,
    /// Classifier confidence in [0, 1].
    pub score: f64,
    /// Signed score: +score for positive, -score for negative, 0.0 for neutral.
    pub sentiment_score: f64,
}
