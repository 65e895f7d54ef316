pub mod client;
pub mod handlers;
pub mod middleware;
pub mod params;
pub mod routes;
pub mod state;

pub use handlers::*;
pub use middleware::*;
pub use routes::*;
pub use state::*;

use ascii_metrics::MetricsService;
use ascii_models::{AnimationRegistry, Config};
use std::sync::Arc;
use tracing::info;

/// Builds the full application with tracing and CORS layers.
pub fn build_app(state: AppState) -> axum::Router {
    create_middleware_stack(build_router(state))
}

pub async fn start_server(
    config: Config,
    registry: AnimationRegistry,
    metrics: Arc<MetricsService>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    registry.validate()?;

    let bind = config.server.bind.clone();
    let port = config.server.port;
    let app_state = AppState::new(config, registry, metrics);

    app_state.frames.warm(&app_state.registry).await;
    info!(
        "Frame cache warmed: {} of {} animations",
        app_state.frames.len().await,
        app_state.registry.len()
    );

    let app = build_app(app_state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind, port)).await?;
    info!("ASCII streamer listening on {}:{}", bind, port);

    axum::serve(listener, app).await?;
    Ok(())
}
