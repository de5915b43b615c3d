use thiserror::Error;

use crate::domain::models::{PermissionKind, ScreenPhase};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Permission denied: {0}")]
    PermissionDenied(PermissionKind),

    #[error("Capture failed: {0}")]
    CaptureFailure(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Prediction endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid prediction response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot {operation} while screen is {phase}")]
    NotReady {
        operation: &'static str,
        phase: ScreenPhase,
    },

    #[error("Device error: {0}")]
    Device(String),
}

impl AppError {
    /// Short machine-readable code for log fields
    pub fn code(&self) -> &'static str {
        match self {
            AppError::PermissionDenied(_) => "PERMISSION_DENIED",
            AppError::CaptureFailure(_) => "CAPTURE_FAILURE",
            AppError::Network(_) => "NETWORK_FAILURE",
            AppError::Status { .. } => "HTTP_STATUS",
            AppError::Decode(_) => "DECODE_FAILURE",
            AppError::Io(_) => "IO_ERROR",
            AppError::NotReady { .. } => "NOT_READY",
            AppError::Device(_) => "DEVICE_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
