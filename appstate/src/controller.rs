//! Capture/classify controller.
//!
//! Owns the lifecycle of the single image on the scan page:
//!
//! ```text
//!            acquire_*                identify()            Some(id)
//!   Idle ─────────────────▶ HasPreview ─────────▶ Analyzing ─────────▶ Resolved(id)
//!    ▲                        ▲    ▲                  │                     │
//!    │                        │    └── None / Err ────┘                     │
//!    └──────── clear() ───────┴─────────────────────────────────────────────┘
//!
//!   camera_active: entered from Idle/HasPreview, left by cancel (phase unchanged)
//!                  or by acquire_from_camera (-> HasPreview)
//! ```
//!
//! `identify` is the only suspension point. While it is in flight, `clear` and
//! new acquisitions still go through; each bumps the session generation, and a
//! completion whose generation no longer matches is dropped without touching
//! state.

use bytes::Bytes;
use common::{CraftId, Route};
use lens_pipeline::Classifier;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::capture::{CameraFrame, CapturedImage, FileUpload, ImageSource, CAMERA_FILE_NAME};
use crate::error::{ControllerError, Result};
use crate::navigation::{Navigator, Notice, Notifier};
use crate::preview::{PreviewRegistry, PreviewUrl};

enum Phase {
    Idle,
    HasPreview { image: CapturedImage },
    Analyzing { image: CapturedImage },
    Resolved { image: CapturedImage, craft: CraftId },
}

impl Phase {
    fn state(&self) -> ControllerState {
        match self {
            Self::Idle => ControllerState::Idle,
            Self::HasPreview { .. } => ControllerState::HasPreview,
            Self::Analyzing { .. } => ControllerState::Analyzing,
            Self::Resolved { craft, .. } => ControllerState::Resolved(*craft),
        }
    }

    fn image(&self) -> Option<&CapturedImage> {
        match self {
            Self::Idle => None,
            Self::HasPreview { image } | Self::Analyzing { image } | Self::Resolved { image, .. } => Some(image),
        }
    }

    fn into_image(self) -> Option<CapturedImage> {
        match self {
            Self::Idle => None,
            Self::HasPreview { image } | Self::Analyzing { image } | Self::Resolved { image, .. } => Some(image),
        }
    }
}

struct Session {
    phase: Phase,
    camera_active: bool,
    /// Bumped by every acquisition and clear.
    generation: u64,
}

/// Observable state, without the held image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "craft", rename_all = "snake_case")]
pub enum ControllerState {
    Idle,
    HasPreview,
    Analyzing,
    Resolved(CraftId),
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::HasPreview => f.write_str("showing a preview"),
            Self::Analyzing => f.write_str("analyzing"),
            Self::Resolved(craft) => write!(f, "resolved to {craft}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub state: ControllerState,
    pub camera_active: bool,
    pub preview: Option<PreviewUrl>,
    pub source: Option<ImageSource>,
}

/// How an `identify` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifyOutcome {
    /// Now in `Resolved(craft)`
    Resolved(CraftId),
    /// Back in `HasPreview`; `CouldNotIdentify` was shown
    NoMatch,
    /// Back in `HasPreview`; `AnalysisFailed` was shown
    Failed,
    /// The image was cleared or replaced meanwhile; result ignored
    Stale,
}

pub struct CaptureController {
    session: Mutex<Session>,
    classifier: Arc<Classifier>,
    previews: Arc<PreviewRegistry>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl CaptureController {
    pub fn new(
        classifier: Arc<Classifier>,
        previews: Arc<PreviewRegistry>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session: Mutex::new(Session {
                phase: Phase::Idle,
                camera_active: false,
                generation: 0,
            }),
            classifier,
            previews,
            navigator,
            notifier,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.session.lock().phase.state()
    }

    pub fn snapshot(&self) -> Snapshot {
        let session = self.session.lock();
        let image = session.phase.image();
        Snapshot {
            state: session.phase.state(),
            camera_active: session.camera_active,
            preview: image.map(|i| i.preview.clone()),
            source: image.map(|i| i.source.clone()),
        }
    }

    /// Show the live camera view.
    pub fn open_camera(&self) -> Result<()> {
        let mut session = self.session.lock();
        match session.phase.state() {
            ControllerState::Idle | ControllerState::HasPreview => {
                session.camera_active = true;
                Ok(())
            }
            state => Err(ControllerError::InvalidState {
                operation: "open the camera",
                state,
            }),
        }
    }

    /// Close the camera view without capturing. The phase is untouched.
    pub fn cancel_camera(&self) {
        self.session.lock().camera_active = false;
    }

    pub fn acquire_from_file(&self, upload: FileUpload) -> PreviewUrl {
        let source = ImageSource::Upload {
            file_name: upload.file_name,
        };
        self.install(upload.bytes, upload.mime, source, false)
    }

    /// Install a camera snapshot and close the camera view.
    pub fn acquire_from_camera(&self, frame: CameraFrame) -> PreviewUrl {
        tracing::debug!("Captured {} from camera", CAMERA_FILE_NAME);
        self.install(frame.bytes, frame.mime, ImageSource::Camera, true)
    }

    /// Install a webcam screenshot given as a `data:` URL.
    pub fn acquire_from_data_url(&self, url: &str) -> Result<PreviewUrl> {
        let frame = CameraFrame::from_data_url(url)?;
        Ok(self.acquire_from_camera(frame))
    }

    /// Drop the image and everything derived from it. Valid in every state.
    pub fn clear(&self) {
        let previous = {
            let mut session = self.session.lock();
            session.generation += 1;
            session.camera_active = false;
            std::mem::replace(&mut session.phase, Phase::Idle)
        };
        self.release(previous);
    }

    /// Classify the held image.
    ///
    /// Valid in `HasPreview` with the camera closed. Notices are raised for
    /// `NoMatch` and `Failed` only; a stale completion is silent.
    pub async fn identify(&self) -> Result<IdentifyOutcome> {
        let (generation, bytes) = self.begin_analysis()?;

        let outcome = self.classifier.classify(bytes).await;

        let result = {
            let mut session = self.session.lock();
            let image = match std::mem::replace(&mut session.phase, Phase::Idle) {
                Phase::Analyzing { image } if session.generation == generation => image,
                other => {
                    session.phase = other;
                    tracing::debug!("Ignoring stale classification (generation {})", generation);
                    return Ok(IdentifyOutcome::Stale);
                }
            };

            match outcome {
                Ok(Some(craft)) => {
                    tracing::info!("Identified craft: {}", craft);
                    session.phase = Phase::Resolved { image, craft };
                    IdentifyOutcome::Resolved(craft)
                }
                Ok(None) => {
                    tracing::info!("No confident match");
                    session.phase = Phase::HasPreview { image };
                    IdentifyOutcome::NoMatch
                }
                Err(e) => {
                    tracing::error!("Image analysis failed: {}", e);
                    session.phase = Phase::HasPreview { image };
                    IdentifyOutcome::Failed
                }
            }
        };

        match result {
            IdentifyOutcome::NoMatch => self.notifier.notify(Notice::CouldNotIdentify),
            IdentifyOutcome::Failed => self.notifier.notify(Notice::AnalysisFailed),
            _ => {}
        }

        Ok(result)
    }

    /// Navigate to the resolved craft's result page.
    pub fn confirm_and_proceed(&self) -> Result<Route> {
        let route = {
            match self.state() {
                ControllerState::Resolved(craft) => Route::result(craft),
                state => {
                    return Err(ControllerError::InvalidState {
                        operation: "proceed",
                        state,
                    })
                }
            }
        };

        tracing::info!("Navigating to {}", route);
        self.navigator.navigate(route.clone());
        Ok(route)
    }

    fn begin_analysis(&self) -> Result<(u64, Bytes)> {
        let mut session = self.session.lock();
        if session.camera_active {
            return Err(ControllerError::CameraActive { operation: "identify" });
        }

        match std::mem::replace(&mut session.phase, Phase::Idle) {
            Phase::HasPreview { image } => {
                let bytes = image.bytes.clone();
                session.phase = Phase::Analyzing { image };
                Ok((session.generation, bytes))
            }
            other => {
                let state = other.state();
                session.phase = other;
                Err(ControllerError::InvalidState {
                    operation: "identify",
                    state,
                })
            }
        }
    }

    fn install(&self, bytes: Bytes, mime: String, source: ImageSource, from_camera: bool) -> PreviewUrl {
        let mut session = self.session.lock();
        session.generation += 1;
        if from_camera {
            session.camera_active = false;
        }

        // at most one preview is live per controller
        let previous = std::mem::replace(&mut session.phase, Phase::Idle);
        self.release(previous);

        let preview = self.previews.create(bytes.clone(), mime.clone());
        session.phase = Phase::HasPreview {
            image: CapturedImage {
                bytes,
                mime,
                source,
                preview: preview.clone(),
            },
        };

        preview
    }

    fn release(&self, previous: Phase) {
        if let Some(image) = previous.into_image() {
            self.previews.revoke(&image.preview);
        }
    }
}

impl Drop for CaptureController {
    fn drop(&mut self) {
        let phase = std::mem::replace(&mut self.session.get_mut().phase, Phase::Idle);
        self.release(phase);
    }
}
