//! Controller and capture errors.

use thiserror::Error;

use crate::controller::ControllerState;

/// Problems turning a camera screenshot or upload into image bytes.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Not an image data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Captured image is empty")]
    EmptyImage,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    /// Operation is not valid in the current state. Nothing was changed.
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: ControllerState,
    },

    /// Operation is not valid while the camera view is open.
    #[error("Cannot {operation} while the camera is active")]
    CameraActive { operation: &'static str },

    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
