use ascii_models::ServerConfig;
use tokio::runtime::{Builder, Runtime};

/// Multi-threaded runtime sized by `server.workers`.
pub fn build_runtime(server: &ServerConfig) -> std::io::Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(server.workers.max(1))
        .thread_name("ascii-worker")
        .enable_all()
        .build()
}
