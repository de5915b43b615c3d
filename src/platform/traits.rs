//! Seams between the capture flow and the world around it
//!
//! The flow never touches hardware, the network or the UI toolkit
//! directly; it goes through these traits so tests can swap in fakes.

use async_trait::async_trait;

use crate::domain::models::{CameraFacing, CapturedImage, EmotionResult, PermissionStatus, Route};
use crate::shared::errors::Result;

/// Camera, media library and permission prompts of the host platform
#[async_trait]
pub trait DeviceCapabilities: Send + Sync {
    async fn request_camera_permission(&self) -> Result<PermissionStatus>;

    async fn request_media_permission(&self) -> Result<PermissionStatus>;

    /// Take a still frame from the given camera
    async fn capture_frame(&self, facing: CameraFacing) -> Result<CapturedImage>;

    /// Open the picker; `None` when the user cancels
    async fn pick_from_library(&self) -> Result<Option<CapturedImage>>;

    /// The screen no longer holds `image`; free whatever backs it
    async fn release(&self, _image: &CapturedImage) -> Result<()> {
        Ok(())
    }
}

/// Remote emotion prediction
#[async_trait]
pub trait EmotionPredictor: Send + Sync {
    async fn predict(&self, image: &CapturedImage) -> Result<EmotionResult>;
}

/// The app hosting the screen: navigation and blocking alerts
pub trait ScreenHost: Send + Sync {
    fn navigate(&self, route: Route);

    fn alert(&self, message: &str);

    /// Called once permissions are resolved
    fn hide_splash(&self) {}
}
