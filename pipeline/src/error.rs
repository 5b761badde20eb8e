/// Pipeline errors
///
/// Everything that can go wrong between raw image bytes and a probability list.
use lens_model_cache::ModelCacheError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("Model load failed: {0}")]
    ModelLoad(#[from] ModelCacheError),

    #[error("Image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Model output has {actual} values, expected one per label ({expected})")]
    OutputMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
