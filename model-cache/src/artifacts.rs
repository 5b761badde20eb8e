//! Where the model's static files live.
//!
//! Artifacts are addressed by URL path (`/model/model.json`) the same way a
//! browser would fetch them, and resolved against a static root directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ModelCacheError, Result};

pub const DEFAULT_MODEL_URL: &str = "/model/model.json";
pub const DEFAULT_METADATA_URL: &str = "/model/metadata.json";

/// Locations of the classifier's `model.json` and `metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelArtifacts {
    pub static_root: PathBuf,
    pub model_url: String,
    pub metadata_url: String,
}

impl ModelArtifacts {
    /// Artifacts at the default URL paths under `static_root`.
    pub fn new(static_root: impl Into<PathBuf>) -> Self {
        Self {
            static_root: static_root.into(),
            model_url: DEFAULT_MODEL_URL.to_string(),
            metadata_url: DEFAULT_METADATA_URL.to_string(),
        }
    }

    pub fn with_urls(mut self, model_url: impl Into<String>, metadata_url: impl Into<String>) -> Self {
        self.model_url = model_url.into();
        self.metadata_url = metadata_url.into();
        self
    }

    pub fn model_path(&self) -> Result<PathBuf> {
        resolve_url_path(&self.static_root, &self.model_url)
    }

    pub fn metadata_path(&self) -> Result<PathBuf> {
        resolve_url_path(&self.static_root, &self.metadata_url)
    }

    /// Weight shards are listed relative to the directory holding `model.json`.
    pub fn shard_path(&self, shard: &str) -> Result<PathBuf> {
        let base = match self.model_url.rfind('/') {
            Some(idx) => &self.model_url[..=idx],
            None => "/",
        };
        resolve_url_path(&self.static_root, &format!("{base}{shard}"))
    }
}

/// Map a URL path onto `root`, refusing anything that would climb out of it.
pub fn resolve_url_path(root: &Path, url_path: &str) -> Result<PathBuf> {
    let mut path = root.to_path_buf();
    let mut pushed = false;

    for segment in url_path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(ModelCacheError::InvalidPath(url_path.to_string())),
            s if s.contains('\\') => return Err(ModelCacheError::InvalidPath(url_path.to_string())),
            s => {
                path.push(s);
                pushed = true;
            }
        }
    }

    if !pushed {
        return Err(ModelCacheError::InvalidPath(url_path.to_string()));
    }
    Ok(path)
}
