//! Terminal host and line commands for driving a capture screen

use std::sync::Mutex;

use crate::domain::models::{Route, ScreenPhase};
use crate::domain::services::CaptureScreen;
use crate::platform::ScreenHost;

/// Prints the results route as JSON and remembers it
#[derive(Default)]
pub struct TerminalHost {
    route: Mutex<Option<Route>>,
}

impl TerminalHost {
    pub fn navigated(&self) -> bool {
        self.route.lock().map(|r| r.is_some()).unwrap_or(false)
    }
}

impl ScreenHost for TerminalHost {
    fn navigate(&self, route: Route) {
        match serde_json::to_string_pretty(&route) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "Failed to render route"),
        }
        if let Ok(mut slot) = self.route.lock() {
            *slot = Some(route);
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("⚠ {}", message);
    }

    fn hide_splash(&self) {
        tracing::debug!("Splash hidden");
    }
}

/// One line of interactive input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    Capture,
    Gallery,
    Flip,
    Back,
    View,
    Quit,
}

impl ScreenCommand {
    pub const HELP: &'static str = "commands: capture | gallery | flip | back | view | quit";
}

impl std::str::FromStr for ScreenCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "capture" => Ok(ScreenCommand::Capture),
            "gallery" => Ok(ScreenCommand::Gallery),
            "flip" => Ok(ScreenCommand::Flip),
            "back" => Ok(ScreenCommand::Back),
            "view" => Ok(ScreenCommand::View),
            "quit" | "exit" => Ok(ScreenCommand::Quit),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

/// Whether the interactive loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Closed,
}

/// Run one command against the screen.
///
/// Submissions started by `capture`/`gallery` are awaited before returning,
/// so a navigation is reported here and not while the next line is read.
pub async fn execute(screen: &CaptureScreen, command: ScreenCommand) -> Step {
    match command {
        ScreenCommand::Capture => match screen.capture().await {
            Ok(()) => screen.settle().await,
            Err(e) => eprintln!("{}", e),
        },
        ScreenCommand::Gallery => match screen.select_from_gallery().await {
            Ok(()) => screen.settle().await,
            Err(e) => eprintln!("{}", e),
        },
        ScreenCommand::Flip => match screen.flip_camera().await {
            Some(facing) => eprintln!("camera: {}", facing.as_str()),
            None => eprintln!("camera can only be flipped while live"),
        },
        ScreenCommand::Back => {
            if !screen.reset().await {
                eprintln!("nothing to go back from");
            }
        }
        ScreenCommand::View => {
            eprintln!("{:?}", screen.view().await);
            if let Some(failure) = screen.last_failure().await {
                eprintln!("last failure: {}", failure);
            }
        }
        ScreenCommand::Quit => screen.unmount().await,
    }

    if screen.phase().await == ScreenPhase::Unmounted {
        Step::Closed
    } else {
        Step::Continue
    }
}
