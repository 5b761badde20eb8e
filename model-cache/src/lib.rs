//! Model artifact loading and caching for the lens classifier.
//!
//! The classifier ships as static files exported by Teachable Machine:
//!
//! ```text
//! {static_root}/model/model.json     TF.js topology + weights manifest
//! {static_root}/model/metadata.json  labels, input size
//! {static_root}/model/weights.bin    weight shards listed in model.json
//! ```
//!
//! [`ModelBundle::load`] reads and cross-checks them. [`SingleFlight`] is the
//! memoization cell that makes sure a process loads the bundle at most once at
//! a time and keeps it after the first success.

pub mod artifacts;
pub mod bundle;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod single_flight;

pub use artifacts::{ModelArtifacts, DEFAULT_METADATA_URL, DEFAULT_MODEL_URL};
pub use bundle::ModelBundle;
pub use error::{ModelCacheError, Result};
pub use manifest::{ModelManifest, WeightGroup, WeightSpec};
pub use metadata::{ModelMetadata, DEFAULT_IMAGE_SIZE, MAX_IMAGE_SIZE};
pub use single_flight::SingleFlight;
