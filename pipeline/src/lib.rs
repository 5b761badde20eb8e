/// CultureVerse Lens classification pipeline
///
/// **Image bytes in, craft identifier out.**
///
/// # Architecture
///
/// ```text
/// Bytes ─▶ preprocess ─▶ InferenceEngine ─▶ ClassificationResult ─▶ LabelResolver ─▶ Option<CraftId>
///                 ▲               ▲
///           ModelMetadata    ModelBundle (model-cache)
/// ```
///
/// This crate composes existing pieces:
/// - **`model-cache`**: artifact paths, bundle loading, single-flight memoization
/// - **`common`**: `CraftId`, the stable identifier the resolver produces
///
/// # Example
///
/// ```no_run
/// use lens_pipeline::{Classifier, EngineFactory, TeachableModelSource};
/// use lens_model_cache::ModelArtifacts;
/// use std::sync::Arc;
///
/// # async fn example(engines: Arc<dyn EngineFactory>, photo: bytes::Bytes) {
/// let source = TeachableModelSource::new(ModelArtifacts::new("public"), engines);
/// let classifier = Classifier::new(Arc::new(source));
///
/// match classifier.classify(photo).await {
///     Ok(Some(craft)) => println!("/result/{craft}"),
///     Ok(None) => println!("could not identify"),
///     Err(e) => println!("analysis failed: {e}"),
/// }
/// # }
/// ```

pub mod classifier;
pub mod engine;
pub mod error;
pub mod labels;
pub mod model;
pub mod preprocess;
pub mod types;

pub use classifier::Classifier;
pub use engine::{EngineFactory, InferenceEngine};
pub use error::{PipelineError, Result};
pub use labels::{LabelResolver, BACKGROUND_LABEL, CRAFT_LABELS};
pub use model::{ImageModel, ModelSource, TeachableModel, TeachableModelSource};
pub use preprocess::{preprocess_bytes, preprocess_image, ImageTensor};
pub use types::{ClassificationResult, Prediction};
