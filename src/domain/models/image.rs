use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Content type sent with every uploaded photo
pub const UPLOAD_CONTENT_TYPE: &str = "image/jpeg";

/// Filename sent with every uploaded photo
pub const UPLOAD_FILENAME: &str = "photo.jpg";

/// Multipart field carrying the photo
pub const UPLOAD_FIELD: &str = "image";

/// File extensions offered by the gallery picker
pub const GALLERY_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Where a captured image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Camera,
    Gallery,
}

impl ImageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSource::Camera => "camera",
            ImageSource::Gallery => "gallery",
        }
    }
}

/// Reference to a photo taken by the camera or chosen from the gallery.
///
/// Only the location is held; bytes are read when the photo is uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedImage {
    pub uri: String,
    pub source: ImageSource,
    pub captured_at: DateTime<Utc>,
}

impl CapturedImage {
    pub fn new(uri: impl Into<String>, source: ImageSource) -> Self {
        Self {
            uri: uri.into(),
            source,
            captured_at: Utc::now(),
        }
    }

    pub fn from_camera(uri: impl Into<String>) -> Self {
        Self::new(uri, ImageSource::Camera)
    }

    pub fn from_gallery(uri: impl Into<String>) -> Self {
        Self::new(uri, ImageSource::Gallery)
    }

    pub fn content_type(&self) -> &'static str {
        UPLOAD_CONTENT_TYPE
    }

    pub fn filename(&self) -> &'static str {
        UPLOAD_FILENAME
    }

    /// Filesystem path behind the uri (`file://` prefix stripped)
    pub fn local_path(&self) -> PathBuf {
        let path = self.uri.strip_prefix("file://").unwrap_or(&self.uri);
        PathBuf::from(path)
    }
}
