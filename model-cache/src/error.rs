use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelCacheError {
    #[error("Model artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("Invalid artifact path: {0}")]
    InvalidPath(String),

    #[error("Invalid model metadata: {0}")]
    InvalidMetadata(String),

    #[error("Invalid model manifest: {0}")]
    InvalidManifest(String),

    #[error("Weight data size mismatch: expected {expected} bytes, found {actual}")]
    WeightSizeMismatch { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelCacheError>;
