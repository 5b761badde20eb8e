//! Central application state.
//!
//! Holds the resources shared by every scan session: the memoized classifier
//! and the preview registry. Controllers are cheap and created per page.

use anyhow::{Context, Result};
use common::init_tracing;
use lens_pipeline::{Classifier, EngineFactory, ModelSource, TeachableModelSource};
use std::path::Path;
use std::sync::Arc;

use crate::config::LensConfig;
use crate::controller::CaptureController;
use crate::navigation::{Navigator, Notifier};
use crate::preview::PreviewRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<LensConfig>,

    /// Shared by all controllers, so the model loads once per process
    pub classifier: Arc<Classifier>,

    pub previews: Arc<PreviewRegistry>,
}

impl AppState {
    /// Wire the state to the exported model described by `config`.
    pub fn new(config: LensConfig, engines: Arc<dyn EngineFactory>) -> Result<Self> {
        let artifacts = config.artifacts();
        artifacts
            .model_path()
            .context("Invalid model URL")?;
        artifacts
            .metadata_path()
            .context("Invalid metadata URL")?;

        tracing::info!(
            "Model artifacts: {} and {} under {:?}",
            artifacts.model_url,
            artifacts.metadata_url,
            artifacts.static_root
        );

        let source = Arc::new(TeachableModelSource::new(artifacts, engines));
        Ok(Self::with_source(config, source))
    }

    /// Wire the state to an arbitrary model source.
    pub fn with_source(config: LensConfig, source: Arc<dyn ModelSource>) -> Self {
        let classifier = Classifier::with_resolver(source, config.resolver());
        Self {
            config: Arc::new(config),
            classifier: Arc::new(classifier),
            previews: Arc::new(PreviewRegistry::new()),
        }
    }

    /// Host entry point: config from `path` plus environment, the global
    /// tracing subscriber at `[logging] level`, then [`AppState::new`].
    ///
    /// `RUST_LOG` still wins over the configured level. An already installed
    /// subscriber is left in place.
    pub fn from_config_file(path: &Path, engines: Arc<dyn EngineFactory>) -> Result<Self> {
        let config = LensConfig::from_env_and_file(Some(path))?;
        if init_tracing(config.logging.level) {
            tracing::info!("Logging initialized at level {}", config.logging.level);
        }
        Self::new(config, engines)
    }

    /// A fresh controller for one scan page.
    pub fn controller(&self, navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> CaptureController {
        CaptureController::new(self.classifier.clone(), self.previews.clone(), navigator, notifier)
    }

    /// Start loading the model ahead of the first identify.
    ///
    /// Returns whether a model is available. A failure here is not cached.
    pub async fn warm_up(&self) -> bool {
        let ready = self.classifier.load().await.is_some();
        if !ready {
            tracing::warn!("Model warm-up failed; identify will retry");
        }
        ready
    }
}
