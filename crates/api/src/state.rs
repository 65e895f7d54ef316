use ascii_metrics::MetricsService;
use ascii_models::{AnimationRegistry, Config};
use ascii_render::FrameStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<AnimationRegistry>,
    pub frames: Arc<FrameStore>,
    pub metrics: Arc<MetricsService>,
}

impl AppState {
    pub fn new(
        config: Config,
        registry: AnimationRegistry,
        metrics: Arc<MetricsService>,
    ) -> Self {
        let frames = Arc::new(FrameStore::new(config.stream.frame_cache_capacity));
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            frames,
            metrics,
        }
    }
}
