//! Image acquisition: file uploads and camera screenshots.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;
use crate::preview::PreviewUrl;

/// Name given to camera snapshots, as if they had been uploaded.
pub const CAMERA_FILE_NAME: &str = "camera-capture.jpg";
pub const CAMERA_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSource {
    Upload { file_name: String },
    Camera,
}

/// A file chosen in the picker.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }
}

/// A still grabbed from the live camera view.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub mime: String,
    pub bytes: Bytes,
}

impl CameraFrame {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            mime: CAMERA_MIME.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Decode a webcam screenshot (`data:image/jpeg;base64,...`).
    pub fn from_data_url(url: &str) -> Result<Self, CaptureError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| CaptureError::InvalidDataUrl(truncate(url)))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CaptureError::InvalidDataUrl(truncate(url)))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| CaptureError::InvalidDataUrl(truncate(url)))?;

        let mime = if mime.is_empty() { CAMERA_MIME } else { mime };
        if !mime.starts_with("image/") {
            return Err(CaptureError::InvalidDataUrl(truncate(url)));
        }

        let bytes = STANDARD.decode(payload.trim())?;
        if bytes.is_empty() {
            return Err(CaptureError::EmptyImage);
        }

        Ok(Self {
            mime: mime.to_string(),
            bytes: bytes.into(),
        })
    }
}

fn truncate(url: &str) -> String {
    url.chars().take(32).collect()
}

/// The one image the controller currently holds.
///
/// Owns its preview reference; the controller revokes it when the image is
/// superseded or the session is cleared.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub bytes: Bytes,
    pub mime: String,
    pub source: ImageSource,
    pub preview: PreviewUrl,
}
