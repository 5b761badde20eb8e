/// Memoized classifier.
///
/// Wraps a [`ModelSource`] with a single-flight cache and the label resolver.
/// Load failures are soft: they are logged, nothing is cached, and callers see
/// "no model" instead of an error. The next call tries again.
use bytes::Bytes;
use common::CraftId;
use lens_model_cache::SingleFlight;
use std::sync::Arc;

use crate::error::Result;
use crate::labels::LabelResolver;
use crate::model::{ImageModel, ModelSource};
use crate::types::ClassificationResult;

pub struct Classifier {
    source: Arc<dyn ModelSource>,
    model: SingleFlight<Arc<dyn ImageModel>>,
    resolver: LabelResolver,
}

impl Classifier {
    pub fn new(source: Arc<dyn ModelSource>) -> Self {
        Self::with_resolver(source, LabelResolver::default())
    }

    pub fn with_resolver(source: Arc<dyn ModelSource>, resolver: LabelResolver) -> Self {
        Self {
            source,
            model: SingleFlight::new(),
            resolver,
        }
    }

    pub fn resolver(&self) -> &LabelResolver {
        &self.resolver
    }

    /// Number of model loads started so far.
    pub fn load_attempts(&self) -> u64 {
        self.model.attempts()
    }

    /// The loaded model, loading it on first use.
    ///
    /// Concurrent callers share one load. `None` when loading failed.
    pub async fn load(&self) -> Option<Arc<dyn ImageModel>> {
        let source = self.source.clone();
        self.model
            .get_or_load(move || async move {
                tracing::info!("Loading classification model...");
                match source.load().await {
                    Ok(model) => {
                        tracing::info!("Classification model loaded ({} labels)", model.labels().len());
                        Some(model)
                    }
                    Err(e) => {
                        tracing::error!("Failed to load classification model: {}", e);
                        None
                    }
                }
            })
            .await
    }

    /// Raw predictions, or `None` when the model is unavailable.
    pub async fn predict(&self, image: Bytes) -> Result<Option<ClassificationResult>> {
        let Some(model) = self.load().await else {
            return Ok(None);
        };
        model.predict(image).await.map(Some)
    }

    /// Classify an image into a craft.
    ///
    /// - `Ok(Some(id))`: identified (possibly via the fallback identifier)
    /// - `Ok(None)`: model unavailable, background, or nothing to choose from
    /// - `Err(_)`: the prediction itself failed
    pub async fn classify(&self, image: Bytes) -> Result<Option<CraftId>> {
        let Some(result) = self.predict(image).await? else {
            tracing::warn!("Classification skipped: model unavailable");
            return Ok(None);
        };

        if let Some(top) = result.top() {
            tracing::info!("Predicted '{}' ({:.3})", top.label, top.probability);
        }

        Ok(self.resolver.resolve(&result))
    }
}
