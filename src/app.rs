use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{health, news, topics};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/news", news::router())
        .nest("/api/topics", topics::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
