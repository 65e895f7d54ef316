pub mod config;
pub mod runtime;

pub use config::{load_config, validate_config};
pub use runtime::build_runtime;
