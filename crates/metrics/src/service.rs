use crate::tracing::TracingService;
use ascii_models::StreamerError;
use prometheus::{
    Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use tracing::debug;

pub struct MetricsService {
    registry: Registry,
    streams_started_total: IntCounterVec,
    chunks_sent_total: IntCounter,
    active_streams: IntGauge,
    browser_hints_total: IntCounter,
    requests_rejected_total: IntCounterVec,
}

fn internal(e: prometheus::Error) -> StreamerError {
    StreamerError::Internal {
        reason: e.to_string(),
    }
}

impl MetricsService {
    pub fn new() -> Result<Self, StreamerError> {
        let registry = Registry::new();

        let streams_started_total = IntCounterVec::new(
            Opts::new(
                "ascii_streams_started_total",
                "Total number of animation streams started",
            ),
            &["animation"],
        )
        .map_err(internal)?;

        let chunks_sent_total = IntCounter::new(
            "ascii_stream_chunks_sent_total",
            "Total number of stream chunks handed to clients",
        )
        .map_err(internal)?;

        let active_streams = IntGauge::new(
            "ascii_active_streams",
            "Number of animation streams currently open",
        )
        .map_err(internal)?;

        let browser_hints_total = IntCounter::new(
            "ascii_browser_hints_total",
            "Total number of browser clients answered with the terminal hint",
        )
        .map_err(internal)?;

        let requests_rejected_total = IntCounterVec::new(
            Opts::new(
                "ascii_requests_rejected_total",
                "Total number of stream requests rejected with an error",
            ),
            &["error_type"],
        )
        .map_err(internal)?;

        // Register metrics
        registry
            .register(Box::new(streams_started_total.clone()))
            .map_err(internal)?;
        registry
            .register(Box::new(chunks_sent_total.clone()))
            .map_err(internal)?;
        registry
            .register(Box::new(active_streams.clone()))
            .map_err(internal)?;
        registry
            .register(Box::new(browser_hints_total.clone()))
            .map_err(internal)?;
        registry
            .register(Box::new(requests_rejected_total.clone()))
            .map_err(internal)?;

        Ok(Self {
            registry,
            streams_started_total,
            chunks_sent_total,
            active_streams,
            browser_hints_total,
            requests_rejected_total,
        })
    }

    /// Counts a new stream and returns the guard that tracks it until dropped.
    pub fn stream_started(&self, animation: &str, stream_id: &str) -> StreamGuard {
        self.streams_started_total
            .with_label_values(&[animation])
            .inc();
        self.active_streams.inc();
        debug!("Active streams: {}", self.active_streams.get());

        StreamGuard {
            animation: animation.to_string(),
            stream_id: stream_id.to_string(),
            chunks: 0,
            chunks_sent_total: self.chunks_sent_total.clone(),
            active_streams: self.active_streams.clone(),
        }
    }

    pub fn record_browser_hint(&self) {
        self.browser_hints_total.inc();
    }

    pub fn record_rejection(&self, error: &StreamerError) {
        self.requests_rejected_total
            .with_label_values(&[error.error_type()])
            .inc();
    }

    pub fn active_streams(&self) -> i64 {
        self.active_streams.get()
    }

    pub fn get_prometheus_metrics(&self) -> Result<String, StreamerError> {
        let metric_families = self.registry.gather();
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();

        encoder.encode(&metric_families, &mut buffer).map_err(internal)?;

        String::from_utf8(buffer).map_err(|e| StreamerError::Internal {
            reason: e.to_string(),
        })
    }
}

/// Lives as long as the response body; dropping it closes the stream's books.
pub struct StreamGuard {
    animation: String,
    stream_id: String,
    chunks: u64,
    chunks_sent_total: IntCounter,
    active_streams: IntGauge,
}

impl StreamGuard {
    pub fn chunk_sent(&mut self) {
        self.chunks += 1;
        self.chunks_sent_total.inc();
    }

    pub fn chunks(&self) -> u64 {
        self.chunks
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.active_streams.dec();
        TracingService::log_stream_finished(&self.animation, &self.stream_id, self.chunks);
    }
}
