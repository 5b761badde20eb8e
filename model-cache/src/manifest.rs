//! TF.js `model.json`: topology plus the weights manifest.
//!
//! The topology is kept as opaque JSON for the inference engine. The weights
//! manifest is interpreted here so shard files can be located and checked.

use serde::{Deserialize, Serialize};

use crate::error::{ModelCacheError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_by: Option<String>,

    #[serde(default)]
    pub model_topology: serde_json::Value,

    pub weights_manifest: Vec<WeightGroup>,
}

/// One group of shards and the tensors packed into them, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightGroup {
    pub paths: Vec<String>,
    pub weights: Vec<WeightSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSpec {
    pub name: String,
    pub shape: Vec<usize>,
    pub dtype: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantization: Option<Quantization>,
}

/// Present when the converter stored a tensor in a narrower dtype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantization {
    pub dtype: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f32>,
}

/// Bytes per element for the dtypes TF.js writes into weight shards.
pub fn dtype_size(dtype: &str) -> Option<usize> {
    match dtype {
        "float32" | "int32" => Some(4),
        "float16" | "uint16" => Some(2),
        "uint8" | "bool" => Some(1),
        _ => None,
    }
}

impl WeightSpec {
    /// Element count, `None` if the shape overflows `usize`.
    pub fn num_elements(&self) -> Option<usize> {
        self.shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
    }

    /// Bytes this tensor occupies on disk.
    pub fn byte_len(&self) -> Result<usize> {
        let stored = self
            .quantization
            .as_ref()
            .map(|q| q.dtype.as_str())
            .unwrap_or(self.dtype.as_str());
        let size = dtype_size(stored).ok_or_else(|| {
            ModelCacheError::InvalidManifest(format!("unsupported dtype '{}' for {}", stored, self.name))
        })?;
        self.num_elements()
            .and_then(|n| n.checked_mul(size))
            .ok_or_else(|| {
                ModelCacheError::InvalidManifest(format!("shape {:?} of {} is too large", self.shape, self.name))
            })
    }
}

impl ModelManifest {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<()> {
        if self.weights_manifest.is_empty() {
            return Err(ModelCacheError::InvalidManifest("weightsManifest is empty".to_string()));
        }
        for (idx, group) in self.weights_manifest.iter().enumerate() {
            if group.paths.is_empty() {
                return Err(ModelCacheError::InvalidManifest(format!(
                    "weight group {idx} lists no shard paths"
                )));
            }
        }
        self.expected_weight_bytes()?;
        Ok(())
    }

    /// Every shard path, in load order.
    pub fn shard_paths(&self) -> impl Iterator<Item = &str> {
        self.weights_manifest
            .iter()
            .flat_map(|group| group.paths.iter().map(String::as_str))
    }

    /// Total bytes the shards must contain.
    pub fn expected_weight_bytes(&self) -> Result<usize> {
        let mut total: usize = 0;
        for weight in self.weights_manifest.iter().flat_map(|g| g.weights.iter()) {
            total = total.checked_add(weight.byte_len()?).ok_or_else(|| {
                ModelCacheError::InvalidManifest("total weight size overflows".to_string())
            })?;
        }
        Ok(total)
    }

    pub fn total_parameters(&self) -> usize {
        self.weights_manifest
            .iter()
            .flat_map(|g| g.weights.iter())
            .filter_map(WeightSpec::num_elements)
            .fold(0, usize::saturating_add)
    }
}
