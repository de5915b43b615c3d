//! Capture → upload → navigate flow for one screen instance
//!
//! State machine:
//!
//! ```text
//! Unknown ──permissions──► Denied
//!    │
//!    └──────permissions──► Live ◄──reset── Previewing ──prediction ok──► Unmounted
//!                            └──capture / gallery──┘
//! ```
//!
//! Submissions run as spawned tasks owned by the screen. `reset` and
//! `unmount` abort them, and a result arriving after that is discarded.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use super::submission::{SubmissionController, SubmissionId};
use crate::domain::models::{
    CameraFacing, CapturedImage, PermissionKind, PermissionState, PermissionStatus, Route,
    ScreenPhase, ScreenView, TabScreen, GALLERY_PERMISSION_ALERT, NO_ACCESS_MESSAGE,
};
use crate::platform::{DeviceCapabilities, EmotionPredictor, ScreenHost};
use crate::screen_span;
use crate::shared::errors::{AppError, Result};
use crate::shared::logging::{self, LogOperation};

struct ScreenState {
    phase: ScreenPhase,
    permission: PermissionState,
    facing: CameraFacing,
    image: Option<CapturedImage>,
    last_failure: Option<String>,
    submissions: SubmissionController,
}

impl ScreenState {
    fn new() -> Self {
        Self {
            phase: ScreenPhase::Unknown,
            permission: PermissionState::Unknown,
            facing: CameraFacing::default(),
            image: None,
            last_failure: None,
            submissions: SubmissionController::new(),
        }
    }

    fn require_live(&self, operation: &'static str) -> Result<()> {
        if self.phase == ScreenPhase::Live {
            Ok(())
        } else {
            Err(AppError::NotReady {
                operation,
                phase: self.phase,
            })
        }
    }
}

/// One mounted capture screen
pub struct CaptureScreen {
    id: Uuid,
    device: Arc<dyn DeviceCapabilities>,
    predictor: Arc<dyn EmotionPredictor>,
    host: Arc<dyn ScreenHost>,
    state: Arc<Mutex<ScreenState>>,
}

impl CaptureScreen {
    /// Tab entry for the enclosing navigator
    pub const TAB: TabScreen = TabScreen {
        name: "Upload",
        icon: "md-upload",
    };

    pub fn new(
        device: Arc<dyn DeviceCapabilities>,
        predictor: Arc<dyn EmotionPredictor>,
        host: Arc<dyn ScreenHost>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            device,
            predictor,
            host,
            state: Arc::new(Mutex::new(ScreenState::new())),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Ask for camera and media library access, once per instance.
    ///
    /// Both prompts run concurrently; a prompt that errors counts as denied.
    pub async fn mount(&self) -> PermissionState {
        {
            let state = self.state.lock().await;
            if state.phase != ScreenPhase::Unknown {
                return state.permission;
            }
        }

        let (camera, media) = tokio::join!(
            self.device.request_camera_permission(),
            self.device.request_media_permission(),
        );
        let camera = resolve_status(PermissionKind::Camera, camera);
        let media = resolve_status(PermissionKind::MediaLibrary, media);
        let permission = PermissionState::combine(camera, media);

        let mut state = self.state.lock().await;
        if state.phase != ScreenPhase::Unknown {
            return state.permission;
        }
        state.permission = permission;
        state.phase = match permission {
            PermissionState::Granted => ScreenPhase::Live,
            _ => ScreenPhase::Denied,
        };
        drop(state);

        logging::log_permissions_resolved(camera, media, permission);
        self.host.hide_splash();
        permission
    }

    /// Take a frame from the live camera and submit it
    pub async fn capture(&self) -> Result<()> {
        let facing = {
            let state = self.state.lock().await;
            state.require_live("capture")?;
            state.facing
        };

        let image = match self.device.capture_frame(facing).await {
            Ok(image) => image,
            Err(e) => {
                let e = if matches!(e, AppError::CaptureFailure(_)) {
                    e
                } else {
                    AppError::CaptureFailure(e.to_string())
                };
                logging::log_capture_failure(facing, &e);
                self.state.lock().await.last_failure = Some(e.to_string());
                return Err(e);
            }
        };

        let mut state = self.state.lock().await;
        if let Err(e) = state.require_live("capture") {
            drop(state);
            release_image(self.device.as_ref(), &image).await;
            return Err(e);
        }
        self.hold_and_submit(&mut state, image, LogOperation::Capture);
        Ok(())
    }

    /// Pick an image from the media library and submit it.
    ///
    /// Media library access is asked for again here. A refusal raises an
    /// alert on the host; a cancelled picker leaves everything unchanged.
    pub async fn select_from_gallery(&self) -> Result<()> {
        self.state.lock().await.require_live("open gallery")?;

        let status = resolve_status(
            PermissionKind::MediaLibrary,
            self.device.request_media_permission().await,
        );
        if !status.is_granted() {
            logging::log_gallery_denied();
            self.host.alert(GALLERY_PERMISSION_ALERT);
            return Err(AppError::PermissionDenied(PermissionKind::MediaLibrary));
        }

        let Some(image) = self.device.pick_from_library().await? else {
            logging::log_gallery_cancelled();
            return Ok(());
        };

        let mut state = self.state.lock().await;
        if let Err(e) = state.require_live("open gallery") {
            drop(state);
            release_image(self.device.as_ref(), &image).await;
            return Err(e);
        }
        self.hold_and_submit(&mut state, image, LogOperation::Gallery);
        Ok(())
    }

    /// Drop the held image and go back to the live camera.
    ///
    /// Returns false when there was nothing to clear.
    pub async fn reset(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.phase != ScreenPhase::Previewing {
            return false;
        }
        if let Some(id) = state.submissions.cancel() {
            logging::log_submit_cancelled(id, "reset");
        }
        let image = state.image.take();
        state.last_failure = None;
        state.phase = ScreenPhase::Live;
        drop(state);

        logging::log_reset();
        if let Some(image) = image {
            release_image(self.device.as_ref(), &image).await;
        }
        true
    }

    /// Switch between back and front camera while live
    pub async fn flip_camera(&self) -> Option<CameraFacing> {
        let mut state = self.state.lock().await;
        if state.phase != ScreenPhase::Live {
            return None;
        }
        state.facing = state.facing.flipped();
        logging::log_camera_flipped(state.facing);
        Some(state.facing)
    }

    /// Tear the screen down, cancelling any in-flight submission
    pub async fn unmount(&self) {
        let mut state = self.state.lock().await;
        if let Some(id) = state.submissions.cancel() {
            logging::log_submit_cancelled(id, "unmount");
        }
        let image = state.image.take();
        state.phase = ScreenPhase::Unmounted;
        drop(state);

        if let Some(image) = image {
            release_image(self.device.as_ref(), &image).await;
        }
    }

    /// Wait for the in-flight submission, if any, to complete or be cancelled
    pub async fn settle(&self) {
        let handle = self.state.lock().await.submissions.take_handle();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "Submission task panicked");
                }
            }
        }
    }

    pub async fn phase(&self) -> ScreenPhase {
        self.state.lock().await.phase
    }

    pub async fn permission(&self) -> PermissionState {
        self.state.lock().await.permission
    }

    pub async fn facing(&self) -> CameraFacing {
        self.state.lock().await.facing
    }

    /// Image currently held, if any
    pub async fn image(&self) -> Option<CapturedImage> {
        self.state.lock().await.image.clone()
    }

    /// Last capture or submission failure, kept for diagnostics
    pub async fn last_failure(&self) -> Option<String> {
        self.state.lock().await.last_failure.clone()
    }

    pub async fn is_submitting(&self) -> bool {
        self.state.lock().await.submissions.active().is_some()
    }

    pub async fn view(&self) -> ScreenView {
        let state = self.state.lock().await;
        match state.phase {
            ScreenPhase::Unknown => ScreenView::Blank,
            ScreenPhase::Denied => ScreenView::NoAccess {
                message: NO_ACCESS_MESSAGE,
            },
            ScreenPhase::Live => ScreenView::Camera {
                facing: state.facing,
            },
            ScreenPhase::Previewing => match &state.image {
                Some(image) => ScreenView::Preview {
                    uri: image.uri.clone(),
                },
                None => ScreenView::Blank,
            },
            ScreenPhase::Unmounted => ScreenView::Closed,
        }
    }

    fn hold_and_submit(&self, state: &mut ScreenState, image: CapturedImage, operation: LogOperation) {
        logging::log_image_held(operation, &image);
        state.image = Some(image.clone());
        state.last_failure = None;
        state.phase = ScreenPhase::Previewing;

        let id = state.submissions.begin();
        let task = run_submission(
            id,
            image,
            Arc::clone(&self.device),
            Arc::clone(&self.predictor),
            Arc::clone(&self.host),
            Arc::clone(&self.state),
        );
        let handle = tokio::spawn(task.instrument(screen_span!(self.id)));
        state.submissions.attach(id, handle);
    }
}

impl Drop for CaptureScreen {
    fn drop(&mut self) {
        // Best effort: a task must not outlive its screen. A held image is
        // not released here since that needs the device to be awaited.
        if let Ok(mut state) = self.state.try_lock() {
            state.submissions.cancel();
        }
    }
}

async fn run_submission(
    id: SubmissionId,
    image: CapturedImage,
    device: Arc<dyn DeviceCapabilities>,
    predictor: Arc<dyn EmotionPredictor>,
    host: Arc<dyn ScreenHost>,
    state: Arc<Mutex<ScreenState>>,
) {
    logging::log_submit_start(id, &image);
    let outcome = predictor.predict(&image).await;

    let mut state = state.lock().await;
    if !state.submissions.finish(id) {
        logging::log_submit_suppressed(id);
        return;
    }

    match outcome {
        Ok(emotions) => {
            logging::log_submit_success(id, &emotions);
            state.image = None;
            state.phase = ScreenPhase::Unmounted;
            drop(state);

            let route = Route::Emotion { emotions };
            logging::log_navigation(&route);
            host.navigate(route);
            release_image(device.as_ref(), &image).await;
        }
        Err(e) => {
            logging::log_submit_failure(id, &e);
            state.last_failure = Some(e.to_string());
        }
    }
}

/// Hand an image the screen let go of back to the device
async fn release_image(device: &dyn DeviceCapabilities, image: &CapturedImage) {
    if let Err(e) = device.release(image).await {
        logging::log_release_failure(image, &e);
    }
}

fn resolve_status(kind: PermissionKind, result: Result<PermissionStatus>) -> PermissionStatus {
    result.unwrap_or_else(|e| {
        logging::log_permission_request_error(kind.as_str(), &e);
        PermissionStatus::Denied
    })
}
