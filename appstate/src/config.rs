//! Configuration for the lens.
//!
//! Sources, highest priority first:
//! - Environment variables (`LENS_STATIC_ROOT`, `LENS_LOG`)
//! - TOML config file
//! - Defaults
//!
//! ```toml
//! [model]
//! static_root = "public"
//! model_url = "/model/model.json"
//! metadata_url = "/model/metadata.json"
//!
//! [resolver]
//! fallback = "channapatna"
//! negative_label = "Background"
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{Context, Result};
use common::{CraftId, LogLevel};
use lens_model_cache::{ModelArtifacts, DEFAULT_METADATA_URL, DEFAULT_MODEL_URL};
use lens_pipeline::{LabelResolver, BACKGROUND_LABEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_STATIC_ROOT: &str = "LENS_STATIC_ROOT";
pub const ENV_LOG: &str = "LENS_LOG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    pub model: ModelConfig,
    pub resolver: ResolverConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory the model URLs are resolved against
    pub static_root: PathBuf,
    pub model_url: String,
    pub metadata_url: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            static_root: PathBuf::from("public"),
            model_url: DEFAULT_MODEL_URL.to_string(),
            metadata_url: DEFAULT_METADATA_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Identifier for labels missing from the craft table
    pub fallback: CraftId,
    pub negative_label: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback: CraftId::Channapatna,
            negative_label: BACKGROUND_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

impl LensConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse lens configuration")
    }

    /// Read a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml_str(&text).with_context(|| format!("Invalid config file {:?}", path))
    }

    /// File (if any) plus process environment.
    pub fn from_env_and_file(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment-style overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_STATIC_ROOT).filter(|v| !v.is_empty()) {
            self.model.static_root = PathBuf::from(root);
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
            self.logging.level = LogLevel::from(level.as_str());
        }
    }

    pub fn artifacts(&self) -> ModelArtifacts {
        ModelArtifacts::new(&self.model.static_root)
            .with_urls(&self.model.model_url, &self.model.metadata_url)
    }

    pub fn resolver(&self) -> LabelResolver {
        LabelResolver::new()
            .with_fallback(self.resolver.fallback)
            .with_negative_label(&self.resolver.negative_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = LensConfig::default();
        let artifacts = config.artifacts();
        assert_eq!(artifacts.model_url, "/model/model.json");
        assert_eq!(artifacts.metadata_url, "/model/metadata.json");
        assert_eq!(config.resolver().fallback(), CraftId::Channapatna);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = LensConfig::from_toml_str(
            r#"
            [model]
            static_root = "/srv/lens"

            [resolver]
            fallback = "warli"
            "#,
        )
        .unwrap();

        assert_eq!(config.model.static_root, PathBuf::from("/srv/lens"));
        assert_eq!(config.model.model_url, DEFAULT_MODEL_URL);
        assert_eq!(config.resolver.fallback, CraftId::Warli);
        assert_eq!(config.resolver.negative_label, "Background");
    }

    #[test]
    fn test_rejects_unknown_fallback() {
        let err = LensConfig::from_toml_str("[resolver]\nfallback = \"terracotta\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse lens configuration"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = LensConfig::from_toml_str("[logging]\nlevel = \"warn\"").unwrap();
        let env: HashMap<&str, &str> = [(ENV_STATIC_ROOT, "/tmp/public"), (ENV_LOG, "debug")].into();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.model.static_root, PathBuf::from("/tmp/public"));
        assert_eq!(config.logging.level, LogLevel::Debug);
    }
}
