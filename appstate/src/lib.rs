//! Application state for the CultureVerse lens.
//!
//! `appstate` sits on top of the classification pipeline and owns everything
//! a scan page needs:
//!
//! ```text
//! scan page (camera, upload, identify, proceed)
//!          ↓
//!     appstate (this crate)
//!          ↓
//! pipeline (classifier, resolver) → model-cache (artifacts, single-flight)
//! ```
//!
//! The page drives a [`CaptureController`]; the controller reports back via
//! the [`Navigator`] and [`Notifier`] seams.

pub mod capture;
pub mod config;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod preview;
pub mod result_view;
pub mod state;

pub use capture::{CameraFrame, CapturedImage, FileUpload, ImageSource, CAMERA_FILE_NAME, CAMERA_MIME};
pub use config::LensConfig;
pub use controller::{CaptureController, ControllerState, IdentifyOutcome, Snapshot};
pub use error::{CaptureError, ControllerError, Result};
pub use navigation::{Navigator, Notice, Notifier};
pub use preview::{PreviewRegistry, PreviewUrl};
pub use result_view::{CraftProfile, ResultView};
pub use state::AppState;
