pub mod service;
pub mod tracing;

pub use service::{MetricsService, StreamGuard};
pub use self::tracing::TracingService;
