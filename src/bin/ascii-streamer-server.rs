use anyhow::{anyhow, Context, Result};
use ascii_metrics::{MetricsService, TracingService};
use ascii_models::{AnimationRegistry, Config};
use ascii_streamer::{build_runtime, load_config, validate_config};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Unable to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                warn!("Unable to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

async fn serve(config: Config, registry: AnimationRegistry, metrics: Arc<MetricsService>) -> Result<()> {
    let server = tokio::spawn(ascii_api::start_server(config, registry, metrics));

    tokio::select! {
        result = server => match result {
            Ok(Ok(())) => info!("Server exited"),
            Ok(Err(e)) => return Err(anyhow!(e)).context("server error"),
            Err(e) => return Err(e).context("server task failed"),
        },
        _ = shutdown_signal() => {
            info!("Received shutdown signal");
        }
    }

    // Open streams are endless; they are cut when the runtime shuts down.
    info!("ASCII streamer shutdown complete");
    Ok(())
}

fn main() -> Result<()> {
    let config = load_config().context("failed to load configuration")?;
    TracingService::init(&config.logging)?;
    validate_config(&config)?;

    info!("Starting ASCII streamer");
    info!("Configuration loaded: {:?}", config.server);

    let base_dir = std::env::current_dir()?;
    let registry = AnimationRegistry::from_config(&config, &base_dir)?;
    info!(
        "Registered {} animations: {}",
        registry.len(),
        registry.names().join(", ")
    );

    let metrics = Arc::new(MetricsService::new()?);

    let runtime = build_runtime(&config.server)?;
    info!("Runtime started with {} workers", config.server.workers);

    let result = runtime.block_on(serve(config, registry, metrics));
    runtime.shutdown_timeout(std::time::Duration::from_secs(2));
    result
}
