use std::sync::Arc;

use crate::services::classifier::SentimentClassifier;
use crate::services::news::NewsProvider;
use crate::services::snapshot_store::SnapshotStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    pub news_provider: Arc<dyn NewsProvider>,
    pub classifier: Arc<dyn SentimentClassifier>,
}
