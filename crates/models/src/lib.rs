pub mod animation;
pub mod config;
pub mod error;

pub use animation::*;
pub use config::*;
pub use error::*;
