//! Runtime configuration
//!
//! Resolution order: built-in defaults, then `EMOTION_*` environment
//! variables, then command line flags (applied by the binary).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prediction endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/predict_emotions/";

pub const ENV_ENDPOINT: &str = "EMOTION_PREDICT_URL";
pub const ENV_CAMERA: &str = "EMOTION_CAMERA";
pub const ENV_FRONT_CAMERA: &str = "EMOTION_FRONT_CAMERA";
pub const ENV_GALLERY: &str = "EMOTION_GALLERY";
pub const ENV_SNAPSHOT_DIR: &str = "EMOTION_SNAPSHOT_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prediction endpoint receiving the multipart upload
    pub endpoint: String,
    /// Frame source for the back camera
    pub camera: Option<PathBuf>,
    /// Frame source for the front camera
    pub front_camera: Option<PathBuf>,
    /// Directory browsed by the gallery picker
    pub gallery: PathBuf,
    /// Where captured frames are written
    pub snapshot_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            camera: None,
            front_camera: None,
            gallery: dirs::picture_dir().unwrap_or_else(|| PathBuf::from(".")),
            snapshot_dir: std::env::temp_dir().join("emotion-capture"),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, test maps)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(camera) = lookup(ENV_CAMERA) {
            self.camera = Some(PathBuf::from(camera));
        }
        if let Some(front) = lookup(ENV_FRONT_CAMERA) {
            self.front_camera = Some(PathBuf::from(front));
        }
        if let Some(gallery) = lookup(ENV_GALLERY) {
            self.gallery = PathBuf::from(gallery);
        }
        if let Some(dir) = lookup(ENV_SNAPSHOT_DIR) {
            self.snapshot_dir = PathBuf::from(dir);
        }
        self
    }
}
