//! Desktop stand-in for the phone camera and photo library
//!
//! A "camera" is a frame file kept up to date by some other process
//! (a webcam grabber, a test fixture). Capturing copies the current frame
//! into the snapshot directory. The gallery is a plain directory of images.

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::domain::models::{
    CameraFacing, CapturedImage, GALLERY_EXTENSIONS, ImageSource, PermissionStatus,
};
use crate::platform::DeviceCapabilities;
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, Result};

/// How the gallery picker chooses an image
#[derive(Debug, Clone)]
pub enum PickerMode {
    /// Always return this file
    Preselected(PathBuf),
    /// Ask on the terminal; an empty answer cancels
    Prompt,
}

pub struct LocalDevice {
    back_camera: Option<PathBuf>,
    front_camera: Option<PathBuf>,
    gallery: PathBuf,
    snapshot_dir: PathBuf,
    picker: PickerMode,
}

impl LocalDevice {
    pub fn new(gallery: impl Into<PathBuf>, snapshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            back_camera: None,
            front_camera: None,
            gallery: gallery.into(),
            snapshot_dir: snapshot_dir.into(),
            picker: PickerMode::Prompt,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut device = Self::new(&config.gallery, &config.snapshot_dir);
        device.back_camera = config.camera.clone();
        device.front_camera = config.front_camera.clone();
        device
    }

    pub fn with_camera(mut self, facing: CameraFacing, source: impl Into<PathBuf>) -> Self {
        match facing {
            CameraFacing::Back => self.back_camera = Some(source.into()),
            CameraFacing::Front => self.front_camera = Some(source.into()),
        }
        self
    }

    pub fn with_picker(mut self, picker: PickerMode) -> Self {
        self.picker = picker;
        self
    }

    fn camera_source(&self, facing: CameraFacing) -> Option<&Path> {
        match facing {
            CameraFacing::Back => self.back_camera.as_deref(),
            CameraFacing::Front => self.front_camera.as_deref(),
        }
    }

    async fn prompt_for_image(&self) -> Result<Option<PathBuf>> {
        let images = list_gallery_images(&self.gallery)?;
        if images.is_empty() {
            eprintln!("No images found in {}", self.gallery.display());
            return Ok(None);
        }

        let answer = tokio::task::spawn_blocking(move || -> std::io::Result<Option<PathBuf>> {
            let mut stderr = std::io::stderr().lock();
            for (index, path) in images.iter().enumerate() {
                writeln!(stderr, "  [{}] {}", index + 1, path.display())?;
            }
            write!(stderr, "Select an image (empty to cancel): ")?;
            stderr.flush()?;

            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            Ok(parse_selection(&line, images.len()).map(|i| images[i].clone()))
        })
        .await
        .map_err(|e| AppError::Device(format!("picker task failed: {}", e)))??;

        Ok(answer)
    }
}

#[async_trait]
impl DeviceCapabilities for LocalDevice {
    /// Granted when any camera has a frame file to read
    async fn request_camera_permission(&self) -> Result<PermissionStatus> {
        for facing in [CameraFacing::Back, CameraFacing::Front] {
            let Some(source) = self.camera_source(facing) else {
                continue;
            };
            if matches!(tokio::fs::metadata(source).await, Ok(meta) if meta.is_file()) {
                return Ok(PermissionStatus::Granted);
            }
        }
        Ok(PermissionStatus::Denied)
    }

    async fn request_media_permission(&self) -> Result<PermissionStatus> {
        Ok(match tokio::fs::metadata(&self.gallery).await {
            Ok(meta) if meta.is_dir() => PermissionStatus::Granted,
            _ => PermissionStatus::Denied,
        })
    }

    async fn capture_frame(&self, facing: CameraFacing) -> Result<CapturedImage> {
        let source = self.camera_source(facing).ok_or_else(|| {
            AppError::CaptureFailure(format!("no {} camera configured", facing.as_str()))
        })?;

        tokio::fs::create_dir_all(&self.snapshot_dir).await?;
        let target = self
            .snapshot_dir
            .join(format!("capture-{}.jpg", Uuid::new_v4()));
        tokio::fs::copy(source, &target).await.map_err(|e| {
            AppError::CaptureFailure(format!("{}: {}", source.display(), e))
        })?;

        Ok(CapturedImage::from_camera(format!("file://{}", target.display())))
    }

    async fn pick_from_library(&self) -> Result<Option<CapturedImage>> {
        let selected = match &self.picker {
            PickerMode::Preselected(path) => {
                if !tokio::fs::try_exists(path).await? {
                    return Err(AppError::Device(format!(
                        "image not found: {}",
                        path.display()
                    )));
                }
                Some(path.clone())
            }
            PickerMode::Prompt => self.prompt_for_image().await?,
        };

        Ok(selected.map(|path| CapturedImage::from_gallery(path.display().to_string())))
    }

    /// Delete snapshots this device wrote; gallery files are never touched
    async fn release(&self, image: &CapturedImage) -> Result<()> {
        let path = image.local_path();
        if image.source != ImageSource::Camera || !path.starts_with(&self.snapshot_dir) {
            return Ok(());
        }
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Images directly inside `dir`, sorted by path
pub fn list_gallery_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let options = glob::MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };

    let mut images = Vec::new();
    for ext in GALLERY_EXTENSIONS {
        let pattern = format!("{}/*.{}", base, ext);
        let paths = glob::glob_with(&pattern, options)
            .map_err(|e| AppError::Device(format!("bad gallery pattern: {}", e)))?;
        images.extend(paths.flatten().filter(|p| p.is_file()));
    }
    images.sort();
    images.dedup();
    Ok(images)
}

/// 1-based answer to a 0-based index; anything else cancels
fn parse_selection(line: &str, count: usize) -> Option<usize> {
    let choice: usize = line.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}
