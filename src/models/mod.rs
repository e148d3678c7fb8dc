mod article;
mod delta;
mod snapshot;

pub use article::{Article, RawArticle, Sentiment};
pub use delta::{DeltaReport, OverallDelta, TopicDelta};
pub use snapshot::{AggregatedSummary, CacheEntry, SentimentCache, Snapshot};
