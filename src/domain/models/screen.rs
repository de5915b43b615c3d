use serde::{Deserialize, Serialize};

use super::emotion::EmotionResult;

/// Message shown when camera or media library access was refused
pub const NO_ACCESS_MESSAGE: &str = "No access to camera";

/// Alert raised when the gallery is opened without media library access
pub const GALLERY_PERMISSION_ALERT: &str = "Permission to access the media library is required!";

/// Which camera the live preview uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    pub fn flipped(self) -> Self {
        match self {
            CameraFacing::Back => CameraFacing::Front,
            CameraFacing::Front => CameraFacing::Back,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraFacing::Back => "back",
            CameraFacing::Front => "front",
        }
    }
}

/// Lifecycle phase of a capture screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenPhase {
    /// Permissions not resolved yet
    Unknown,
    /// Camera or media library refused; terminal for this instance
    Denied,
    /// Live camera preview, no image held
    Live,
    /// Image held, submission pending or failed
    Previewing,
    /// Navigated away or torn down
    Unmounted,
}

impl ScreenPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenPhase::Unknown => "unknown",
            ScreenPhase::Denied => "denied",
            ScreenPhase::Live => "live",
            ScreenPhase::Previewing => "previewing",
            ScreenPhase::Unmounted => "unmounted",
        }
    }
}

impl std::fmt::Display for ScreenPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the screen currently displays
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenView {
    /// Waiting for permission prompts
    Blank,
    NoAccess { message: &'static str },
    /// Live preview with capture, flip and gallery controls
    Camera { facing: CameraFacing },
    /// Held image with a back control
    Preview { uri: String },
    Closed,
}

/// Navigation targets reachable from the capture screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", content = "params")]
pub enum Route {
    Emotion { emotions: EmotionResult },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Emotion { .. } => "Emotion",
        }
    }
}

/// Entry the enclosing tab navigator needs to register a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabScreen {
    pub name: &'static str,
    pub icon: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_flip() {
        assert_eq!(CameraFacing::default(), CameraFacing::Back);
        assert_eq!(CameraFacing::Back.flipped(), CameraFacing::Front);
        assert_eq!(CameraFacing::Front.flipped(), CameraFacing::Back);
    }

    #[test]
    fn test_route_serializes_with_params() {
        let route = Route::Emotion {
            emotions: EmotionResult::from([("happy", 0.9)]),
        };
        assert_eq!(route.name(), "Emotion");
        assert_eq!(
            serde_json::to_value(&route).unwrap(),
            serde_json::json!({"screen": "Emotion", "params": {"emotions": {"happy": 0.9}}})
        );
    }
}
