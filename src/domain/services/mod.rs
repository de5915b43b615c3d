// Domain services
pub mod capture_screen;
pub mod submission;

pub use capture_screen::CaptureScreen;
pub use submission::{SubmissionController, SubmissionId};
