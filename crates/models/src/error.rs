use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ErrorShape {
    pub detail: String,
    pub error_type: String,
}

#[derive(Error, Debug)]
pub enum StreamerError {
    #[error("Animation '{name}' not found")]
    AnimationNotFound { name: String },

    #[error("Invalid query parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Animation '{name}' has non-absolute json_path: {path}")]
    NonAbsolutePath { name: String, path: String },

    #[error("JSON not found: {path}")]
    AssetNotFound { path: String },

    #[error("Invalid animation asset {path}: {reason}")]
    InvalidAsset { path: String, reason: String },

    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {reason}")]
    Internal { reason: String },
}

impl StreamerError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        StreamerError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn to_error_shape(&self) -> ErrorShape {
        ErrorShape {
            detail: self.to_string(),
            error_type: self.error_type().to_string(),
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            StreamerError::AnimationNotFound { .. } => "NotFound",
            StreamerError::InvalidParameter { .. } => "ValidationError",
            StreamerError::NonAbsolutePath { .. } => "ConfigurationError",
            StreamerError::AssetNotFound { .. } => "AssetError",
            StreamerError::InvalidAsset { .. } => "AssetError",
            StreamerError::Config { .. } => "ConfigurationError",
            StreamerError::Io(_) => "InternalError",
            StreamerError::Internal { .. } => "InternalError",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            StreamerError::AnimationNotFound { .. } => 404,
            StreamerError::InvalidParameter { .. } => 422,
            StreamerError::NonAbsolutePath { .. } => 500,
            StreamerError::AssetNotFound { .. } => 500,
            StreamerError::InvalidAsset { .. } => 500,
            StreamerError::Config { .. } => 500,
            StreamerError::Io(_) => 500,
            StreamerError::Internal { .. } => 500,
        }
    }
}
