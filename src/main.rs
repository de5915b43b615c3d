//! Emotion Capture - command line entry point
//!
//! Drives one capture screen against the local camera/gallery stand-ins
//! and the configured prediction endpoint.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use emotion_capture::domain::models::{PermissionState, ScreenPhase, ScreenView};
use emotion_capture::infrastructure::api::HttpPredictor;
use emotion_capture::infrastructure::device::{LocalDevice, PickerMode};
use emotion_capture::infrastructure::terminal::{execute, ScreenCommand, Step, TerminalHost};
use emotion_capture::shared::config::AppConfig;
use emotion_capture::shared::logging;
use emotion_capture::CaptureScreen;

#[derive(Parser)]
#[command(name = "emotion-capture")]
#[command(about = "Capture or pick a photo and get its emotion prediction")]
struct Cli {
    /// Prediction endpoint (env: EMOTION_PREDICT_URL)
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Back camera frame file (env: EMOTION_CAMERA)
    #[arg(long, global = true)]
    camera: Option<PathBuf>,
    /// Front camera frame file (env: EMOTION_FRONT_CAMERA)
    #[arg(long, global = true)]
    front_camera: Option<PathBuf>,
    /// Gallery directory (env: EMOTION_GALLERY)
    #[arg(long, global = true)]
    gallery: Option<PathBuf>,
    /// Directory for captured frames (env: EMOTION_SNAPSHOT_DIR)
    #[arg(long, global = true)]
    snapshot_dir: Option<PathBuf>,
    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Take one photo and submit it
    Capture {
        /// Use the front camera
        #[arg(long)]
        front: bool,
    },
    /// Pick a photo from the gallery and submit it
    Pick {
        /// Skip the prompt and use this file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Drive the screen line by line
    Interactive,
}

impl Cli {
    fn config(&self) -> AppConfig {
        let mut config = AppConfig::from_env();
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(camera) = &self.camera {
            config.camera = Some(camera.clone());
        }
        if let Some(front) = &self.front_camera {
            config.front_camera = Some(front.clone());
        }
        if let Some(gallery) = &self.gallery {
            config.gallery = gallery.clone();
        }
        if let Some(dir) = &self.snapshot_dir {
            config.snapshot_dir = dir.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(logging::env_filter(
            &std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).unwrap_or_default(),
        ))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        bail!("no command given, try --help");
    };

    let picker = match &command {
        Command::Pick { file: Some(file) } => PickerMode::Preselected(file.clone()),
        _ => PickerMode::Prompt,
    };
    let device = LocalDevice::from_config(&config).with_picker(picker);
    let predictor = HttpPredictor::new(config.endpoint.clone());
    let host = Arc::new(TerminalHost::default());

    tracing::info!(
        tab = CaptureScreen::TAB.name,
        endpoint = %config.endpoint,
        "Starting capture screen"
    );
    let screen = CaptureScreen::new(Arc::new(device), Arc::new(predictor), host.clone());

    if screen.mount().await != PermissionState::Granted {
        if let ScreenView::NoAccess { message } = screen.view().await {
            eprintln!("{}", message);
        }
        bail!("camera or media library access denied");
    }

    match command {
        Command::Capture { front } => {
            if front {
                screen.flip_camera().await;
            }
            screen.capture().await.context("capture failed")?;
            screen.settle().await;
        }
        Command::Pick { .. } => {
            screen
                .select_from_gallery()
                .await
                .context("gallery selection failed")?;
            if screen.phase().await == ScreenPhase::Live {
                bail!("selection cancelled");
            }
            screen.settle().await;
        }
        Command::Interactive => run_interactive(&screen).await?,
    }

    if host.navigated() {
        return Ok(());
    }
    match screen.last_failure().await {
        Some(failure) => bail!("prediction failed: {}", failure),
        None => bail!("screen closed without a prediction"),
    }
}

async fn run_interactive(screen: &CaptureScreen) -> anyhow::Result<()> {
    eprintln!("{}", ScreenCommand::HELP);

    loop {
        let Some(line) = read_line("> ").await? else {
            screen.unmount().await;
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ScreenCommand>() {
            Ok(command) => {
                if execute(screen, command).await == Step::Closed {
                    return Ok(());
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }
}

/// Blocking stdin read shared with the gallery prompt; `None` on EOF
async fn read_line(prompt: &'static str) -> anyhow::Result<Option<String>> {
    tokio::task::spawn_blocking(move || -> std::io::Result<Option<String>> {
        let mut stderr = std::io::stderr().lock();
        write!(stderr, "{}", prompt)?;
        stderr.flush()?;

        let mut line = String::new();
        let read = std::io::stdin().read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    })
    .await
    .context("stdin reader failed")?
    .context("failed to read stdin")
}
