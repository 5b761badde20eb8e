//! Transient display references for captured images.
//!
//! The web build hands `<img>` tags an object URL per capture. Here the same
//! role is played by a registry of `blob:` style references. References are
//! released explicitly by whoever owns the image; nothing is reclaimed
//! implicitly, so `live_count` is the leak check.

use bytes::Bytes;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const URL_PREFIX: &str = "blob:cultureverse/";

/// Display-ready reference to an in-memory image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewUrl(String);

impl PreviewUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct PreviewEntry {
    pub bytes: Bytes,
    pub mime: String,
}

#[derive(Debug, Default)]
pub struct PreviewRegistry {
    entries: DashMap<String, PreviewEntry>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a fresh reference to `bytes`.
    pub fn create(&self, bytes: Bytes, mime: impl Into<String>) -> PreviewUrl {
        let url = format!("{URL_PREFIX}{}", Uuid::new_v4());
        self.entries.insert(
            url.clone(),
            PreviewEntry {
                bytes,
                mime: mime.into(),
            },
        );
        tracing::trace!("Created preview {}", url);
        PreviewUrl(url)
    }

    /// Image behind a live reference.
    pub fn resolve(&self, url: &PreviewUrl) -> Option<PreviewEntry> {
        self.entries.get(url.as_str()).map(|entry| entry.clone())
    }

    /// Release a reference. Returns `false` if it was already released.
    pub fn revoke(&self, url: &PreviewUrl) -> bool {
        let revoked = self.entries.remove(url.as_str()).is_some();
        if revoked {
            tracing::trace!("Revoked preview {}", url);
        }
        revoked
    }

    pub fn is_live(&self, url: &PreviewUrl) -> bool {
        self.entries.contains_key(url.as_str())
    }

    pub fn live_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_resolve_revoke() {
        let registry = PreviewRegistry::new();
        let url = registry.create(Bytes::from_static(b"jpeg"), "image/jpeg");

        assert!(url.as_str().starts_with("blob:cultureverse/"));
        assert_eq!(registry.live_count(), 1);

        let entry = registry.resolve(&url).expect("preview should be live");
        assert_eq!(entry.bytes, Bytes::from_static(b"jpeg"));
        assert_eq!(entry.mime, "image/jpeg");

        assert!(registry.revoke(&url));
        assert!(!registry.revoke(&url));
        assert!(registry.resolve(&url).is_none());
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_references_are_unique() {
        let registry = PreviewRegistry::new();
        let a = registry.create(Bytes::from_static(b"x"), "image/png");
        let b = registry.create(Bytes::from_static(b"x"), "image/png");
        assert_ne!(a, b);
        assert_eq!(registry.live_count(), 2);
    }
}
