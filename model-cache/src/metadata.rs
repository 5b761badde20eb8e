//! Teachable Machine `metadata.json`.

use serde::{Deserialize, Serialize};

use crate::error::{ModelCacheError, Result};

pub const DEFAULT_IMAGE_SIZE: u32 = 224;

/// Largest input edge accepted from `imageSize`.
pub const MAX_IMAGE_SIZE: u32 = 2048;

/// Label list and input geometry exported next to the model.
///
/// Only `labels` is required. The label order is the order of the model's
/// output probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub labels: Vec<String>,

    #[serde(default = "default_image_size")]
    pub image_size: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tfjs_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tm_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<serde_json::Value>,
}

fn default_image_size() -> u32 {
    DEFAULT_IMAGE_SIZE
}

impl ModelMetadata {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let metadata: Self = serde_json::from_str(json)?;
        metadata.validate()?;
        Ok(metadata)
    }

    pub fn validate(&self) -> Result<()> {
        if self.labels.is_empty() {
            return Err(ModelCacheError::InvalidMetadata("label list is empty".to_string()));
        }
        if let Some(blank) = self.labels.iter().position(|l| l.trim().is_empty()) {
            return Err(ModelCacheError::InvalidMetadata(format!("label {blank} is blank")));
        }
        if self.image_size == 0 || self.image_size > MAX_IMAGE_SIZE {
            return Err(ModelCacheError::InvalidMetadata(format!(
                "imageSize must be in 1..={MAX_IMAGE_SIZE}, got {}",
                self.image_size
            )));
        }
        Ok(())
    }

    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }
}
