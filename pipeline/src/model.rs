/// Loaded classifier models and where they come from.
use async_trait::async_trait;
use bytes::Bytes;
use lens_model_cache::{ModelArtifacts, ModelBundle};
use std::sync::Arc;

use crate::engine::{EngineFactory, InferenceEngine};
use crate::error::{PipelineError, Result};
use crate::preprocess::preprocess_bytes;
use crate::types::ClassificationResult;

/// A model ready to classify images.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Class names in output order.
    fn labels(&self) -> &[String];

    /// One prediction per label for an encoded image.
    async fn predict(&self, image: Bytes) -> Result<ClassificationResult>;
}

/// Produces a model. Called at most once at a time by [`crate::Classifier`].
#[async_trait]
pub trait ModelSource: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn ImageModel>>;
}

/// Teachable Machine export on disk, run through an [`InferenceEngine`].
pub struct TeachableModelSource {
    artifacts: ModelArtifacts,
    engines: Arc<dyn EngineFactory>,
}

impl TeachableModelSource {
    pub fn new(artifacts: ModelArtifacts, engines: Arc<dyn EngineFactory>) -> Self {
        Self { artifacts, engines }
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }
}

#[async_trait]
impl ModelSource for TeachableModelSource {
    async fn load(&self) -> Result<Arc<dyn ImageModel>> {
        let bundle = ModelBundle::load(&self.artifacts).await?;
        let engine = self.engines.build(&bundle)?;
        Ok(Arc::new(TeachableModel::new(bundle, engine)))
    }
}

pub struct TeachableModel {
    bundle: ModelBundle,
    engine: Arc<dyn InferenceEngine>,
}

impl TeachableModel {
    pub fn new(bundle: ModelBundle, engine: Arc<dyn InferenceEngine>) -> Self {
        Self { bundle, engine }
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }
}

#[async_trait]
impl ImageModel for TeachableModel {
    fn labels(&self) -> &[String] {
        self.bundle.labels()
    }

    async fn predict(&self, image: Bytes) -> Result<ClassificationResult> {
        let image_size = self.bundle.metadata.image_size;

        // decoding and resizing are CPU-bound
        let tensor = tokio::task::spawn_blocking(move || preprocess_bytes(&image, image_size))
            .await
            .map_err(|e| PipelineError::InferenceFailed(format!("preprocessing task failed: {e}")))??;

        let scores = self.engine.infer(&tensor).await?;

        let labels = self.labels();
        if scores.len() != labels.len() {
            return Err(PipelineError::OutputMismatch {
                expected: labels.len(),
                actual: scores.len(),
            });
        }

        Ok(ClassificationResult::from_scores(labels, &scores))
    }
}
