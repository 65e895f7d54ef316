use crate::{handlers::*, AppState};
use axum::{routing::get, Router};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        // Animations
        .route("/a", get(list_animations))
        .route("/a/:name", get(stream_animation))
        .route("/metrics", get(metrics))
}

pub fn build_router(state: AppState) -> Router {
    create_router().with_state(state)
}
