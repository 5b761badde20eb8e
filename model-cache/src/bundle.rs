//! Loading the full artifact set from disk.

use bytes::{Bytes, BytesMut};
use std::path::Path;

use crate::artifacts::ModelArtifacts;
use crate::error::{ModelCacheError, Result};
use crate::manifest::ModelManifest;
use crate::metadata::ModelMetadata;

/// Everything an inference engine needs: labels, topology and raw weights.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub artifacts: ModelArtifacts,
    pub metadata: ModelMetadata,
    pub manifest: ModelManifest,
    /// All shards concatenated in manifest order.
    pub weights: Bytes,
}

impl ModelBundle {
    /// Read `metadata.json`, `model.json` and every weight shard.
    pub async fn load(artifacts: &ModelArtifacts) -> Result<Self> {
        let metadata_path = artifacts.metadata_path()?;
        let model_path = artifacts.model_path()?;

        log::info!("Loading model from {}", model_path.display());

        let metadata = ModelMetadata::from_json(&read_text(&metadata_path).await?)?;
        let manifest = ModelManifest::from_json(&read_text(&model_path).await?)?;

        let mut weights = BytesMut::new();
        for shard in manifest.shard_paths() {
            let shard_path = artifacts.shard_path(shard)?;
            let data = read_bytes(&shard_path).await?;
            log::debug!("Read weight shard {} ({} bytes)", shard_path.display(), data.len());
            weights.extend_from_slice(&data);
        }

        let expected = manifest.expected_weight_bytes()?;
        if weights.len() != expected {
            return Err(ModelCacheError::WeightSizeMismatch {
                expected,
                actual: weights.len(),
            });
        }

        log::info!(
            "Model loaded: {} classes, {} parameters, input {}x{}",
            metadata.num_classes(),
            manifest.total_parameters(),
            metadata.image_size,
            metadata.image_size
        );

        Ok(Self {
            artifacts: artifacts.clone(),
            metadata,
            manifest,
            weights: weights.freeze(),
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.metadata.labels
    }
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ModelCacheError::ArtifactMissing(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

async fn read_text(path: &Path) -> Result<String> {
    let data = read_bytes(path).await?;
    String::from_utf8(data).map_err(|e| {
        ModelCacheError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
