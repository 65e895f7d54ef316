use ascii_models::{LoggingConfig, StreamerError};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub struct TracingService;

impl TracingService {
    /// Installs the global subscriber. `RUST_LOG` wins over `config.level`.
    pub fn init(config: &LoggingConfig) -> Result<(), StreamerError> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .map_err(|e| StreamerError::Config {
                reason: format!("invalid log level '{}': {}", config.level, e),
            })?;

        let installed = if config.json {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
                .try_init()
        } else {
            tracing_subscriber::fmt().with_env_filter(filter).try_init()
        };

        installed.map_err(|e| StreamerError::Internal {
            reason: format!("tracing already initialized: {}", e),
        })
    }

    pub fn log_stream_started(animation: &str, stream_id: &str, delay_secs: f64, banner: &str) {
        info!(
            animation = %animation,
            stream_id = %stream_id,
            delay_secs = delay_secs,
            banner = %banner,
            "Stream started"
        );
    }

    pub fn log_stream_finished(animation: &str, stream_id: &str, frames_sent: u64) {
        info!(
            animation = %animation,
            stream_id = %stream_id,
            frames_sent = frames_sent,
            "Stream finished"
        );
    }

    pub fn log_browser_hint(path: &str, user_agent: &str) {
        info!(
            path = %path,
            user_agent = %user_agent,
            "Browser client redirected to terminal hint"
        );
    }
}
