// Domain models
// Pure Rust, no platform dependencies

pub mod emotion;
pub mod image;
pub mod permission;
pub mod screen;

pub use emotion::{EmotionResult, PredictionResponse};
pub use image::*;
pub use permission::{PermissionKind, PermissionState, PermissionStatus};
pub use screen::{
    CameraFacing, Route, ScreenPhase, ScreenView, TabScreen, GALLERY_PERMISSION_ALERT,
    NO_ACCESS_MESSAGE,
};
