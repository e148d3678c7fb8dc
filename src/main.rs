mod app;
mod errors;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::services::classifier::HttpClassifier;
use crate::services::news::{NewsApiProvider, NewsConfig};
use crate::services::snapshot_store::{CacheConfig, SnapshotStore};
use crate::state::AppState;
use crate::store::FileCacheStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging(logging::LoggingConfig::from_env());

    let news_config = NewsConfig::from_env()?;
    let store = SnapshotStore::new(
        Box::new(FileCacheStore::from_env()),
        CacheConfig::from_env(),
    );

    let state = AppState {
        store: Arc::new(store),
        news_provider: Arc::new(NewsApiProvider::new(news_config)),
        classifier: Arc::new(HttpClassifier::from_env()),
    };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Newspulse backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
