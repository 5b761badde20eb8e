/// Inference engine seam.
///
/// The forward pass itself belongs to whatever runtime hosts the exported
/// network (TF.js in the browser, a native runtime elsewhere). The pipeline
/// only needs one probability per metadata label back.
use async_trait::async_trait;
use lens_model_cache::ModelBundle;
use std::sync::Arc;

use crate::error::Result;
use crate::preprocess::ImageTensor;

#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Per-class probabilities, aligned with the bundle's label order.
    async fn infer(&self, input: &ImageTensor) -> Result<Vec<f32>>;
}

/// Builds an engine once the artifacts are on hand.
pub trait EngineFactory: Send + Sync {
    fn build(&self, bundle: &ModelBundle) -> Result<Arc<dyn InferenceEngine>>;
}

impl<F> EngineFactory for F
where
    F: Fn(&ModelBundle) -> Result<Arc<dyn InferenceEngine>> + Send + Sync,
{
    fn build(&self, bundle: &ModelBundle) -> Result<Arc<dyn InferenceEngine>> {
        self(bundle)
    }
}
