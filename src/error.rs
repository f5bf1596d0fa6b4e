//! Error types shared by the probability core, the model loader and the API.

use thiserror::Error;

/// Result type alias for prediction operations
pub type Result<T> = std::result::Result<T, PredictError>;

#[derive(Error, Debug)]
pub enum PredictError {
    /// Caller supplied an input outside the accepted domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required resource (model artifact, loaded model) is absent
    #[error("not found: {0}")]
    NotFound(String),

    /// Model artifact parsed but its contents are inconsistent
    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PredictError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_model(msg: impl Into<String>) -> Self {
        Self::InvalidModel(msg.into())
    }
}
