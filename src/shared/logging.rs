//! Structured logging for the capture screen
//!
//! Every event carries an `operation` field so a single filter can follow
//! one step of the capture → upload → navigate flow.

use crate::domain::models::{
    CameraFacing, CapturedImage, EmotionResult, PermissionState, PermissionStatus, Route,
};
use crate::shared::errors::AppError;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`-style directives, `info` when none are given
pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Flow steps used as the `operation` field
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    Permissions,
    Capture,
    Gallery,
    Submit,
    Navigation,
    Reset,
    Camera,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::Permissions => "permissions",
            LogOperation::Capture => "capture",
            LogOperation::Gallery => "gallery",
            LogOperation::Submit => "submit",
            LogOperation::Navigation => "navigation",
            LogOperation::Reset => "reset",
            LogOperation::Camera => "camera",
        }
    }
}

/// Log the combined permission outcome
pub fn log_permissions_resolved(
    camera: PermissionStatus,
    media: PermissionStatus,
    state: PermissionState,
) {
    tracing::info!(
        operation = LogOperation::Permissions.as_str(),
        camera = ?camera,
        media_library = ?media,
        state = ?state,
        "Permissions resolved"
    );
}

/// Log a permission prompt that failed outright
pub fn log_permission_request_error(kind: &str, error: &AppError) {
    tracing::warn!(
        operation = LogOperation::Permissions.as_str(),
        permission = kind,
        error = %error,
        "Permission request failed, treating as denied"
    );
}

/// Log a new held image
pub fn log_image_held(operation: LogOperation, image: &CapturedImage) {
    tracing::info!(
        operation = operation.as_str(),
        source = image.source.as_str(),
        uri = %image.uri,
        "Image captured"
    );
}

/// Log a camera frame that could not be taken
pub fn log_capture_failure(facing: CameraFacing, error: &AppError) {
    tracing::error!(
        operation = LogOperation::Capture.as_str(),
        facing = facing.as_str(),
        code = error.code(),
        error = %error,
        "Failed to capture frame"
    );
}

/// Log a picker dismissed without a selection
pub fn log_gallery_cancelled() {
    tracing::debug!(
        operation = LogOperation::Gallery.as_str(),
        "Gallery selection cancelled"
    );
}

/// Log gallery access refused at selection time
pub fn log_gallery_denied() {
    tracing::warn!(
        operation = LogOperation::Gallery.as_str(),
        "Media library permission denied at selection time"
    );
}

/// Log submission start
pub fn log_submit_start(submission_id: u64, image: &CapturedImage) {
    tracing::debug!(
        operation = LogOperation::Submit.as_str(),
        submission_id = submission_id,
        uri = %image.uri,
        "Submitting image for prediction"
    );
}

/// Log decoded prediction
pub fn log_submit_success(submission_id: u64, emotions: &EmotionResult) {
    tracing::info!(
        operation = LogOperation::Submit.as_str(),
        submission_id = submission_id,
        emotions = ?emotions,
        "Prediction received"
    );
}

/// Diagnostic entry for a failed submission
pub fn log_submit_failure(submission_id: u64, error: &AppError) {
    tracing::error!(
        operation = LogOperation::Submit.as_str(),
        submission_id = submission_id,
        code = error.code(),
        error = %error,
        "Prediction request failed"
    );
}

/// Log a completion that arrived after its submission was cancelled
pub fn log_submit_suppressed(submission_id: u64) {
    tracing::debug!(
        operation = LogOperation::Submit.as_str(),
        submission_id = submission_id,
        "Dropped result of cancelled submission"
    );
}

/// Log an aborted in-flight submission
pub fn log_submit_cancelled(submission_id: u64, reason: &str) {
    tracing::info!(
        operation = LogOperation::Submit.as_str(),
        submission_id = submission_id,
        reason = reason,
        "Cancelled in-flight submission"
    );
}

/// Log navigation away from the capture screen
pub fn log_navigation(route: &Route) {
    tracing::info!(
        operation = LogOperation::Navigation.as_str(),
        screen = route.name(),
        "Navigating"
    );
}

/// Log a cleared image
pub fn log_reset() {
    tracing::debug!(
        operation = LogOperation::Reset.as_str(),
        "Cleared held image, back to live camera"
    );
}

/// Log an image the device could not free
pub fn log_release_failure(image: &CapturedImage, error: &AppError) {
    tracing::warn!(
        operation = LogOperation::Reset.as_str(),
        uri = %image.uri,
        error = %error,
        "Failed to release discarded image"
    );
}

/// Log a camera flip
pub fn log_camera_flipped(facing: CameraFacing) {
    tracing::debug!(
        operation = LogOperation::Camera.as_str(),
        facing = facing.as_str(),
        "Camera flipped"
    );
}

/// Span wrapping every event of one screen instance
#[macro_export]
macro_rules! screen_span {
    ($screen_id:expr) => {
        tracing::info_span!("capture_screen", screen_id = %$screen_id)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_operation_as_str() {
        assert_eq!(LogOperation::Permissions.as_str(), "permissions");
        assert_eq!(LogOperation::Capture.as_str(), "capture");
        assert_eq!(LogOperation::Gallery.as_str(), "gallery");
        assert_eq!(LogOperation::Submit.as_str(), "submit");
        assert_eq!(LogOperation::Navigation.as_str(), "navigation");
        assert_eq!(LogOperation::Reset.as_str(), "reset");
        assert_eq!(LogOperation::Camera.as_str(), "camera");
    }

    #[test]
    fn test_env_filter_defaults_to_info() {
        assert_eq!(env_filter("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_env_filter_honours_bare_level() {
        assert_eq!(env_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(env_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
    }
}
