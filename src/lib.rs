// Public API exports
pub mod domain;
pub mod infrastructure;
pub mod platform;
pub mod shared;

pub use domain::models::{CapturedImage, EmotionResult, Route, ScreenPhase, ScreenView};
pub use domain::services::CaptureScreen;
pub use shared::errors::{AppError, Result};
