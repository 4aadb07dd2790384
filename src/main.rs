// XsimWatch - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading (before logging, so [logging] settings apply)
// 3. Logging initialisation (debug mode support)
// 4. Monitor thread start
// 5. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use xsimwatch::app;

pub use xsimwatch::core;
pub use xsimwatch::platform;
pub use xsimwatch::ui;
pub use xsimwatch::util;

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use xsimwatch::core::model::{DiagnosticLevel, Project};

/// XsimWatch - shows the latest failing xsim log of the open Vivado project.
///
/// Finds the project from the Vivado window title (or the given .xpr file),
/// watches the simulation logs under <project>.sim/, and displays the newest
/// log that contains an error, with clickable source references.
#[derive(Parser, Debug)]
#[command(name = "XsimWatch", version, about)]
struct Cli {
    /// Project file (.xpr) to watch. Skips window title detection.
    project: Option<PathBuf>,

    /// Application name expected at the end of the host window title.
    #[arg(long = "host-app")]
    host_app: Option<String>,

    /// Poll interval in milliseconds.
    #[arg(short = 'i', long = "interval-ms", value_parser = parse_interval)]
    interval_ms: Option<u64>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_interval(s: &str) -> Result<u64, String> {
    let ms: u64 = s.parse().map_err(|e| format!("'{s}' is not a number: {e}"))?;
    platform::config::validate_poll_interval(ms).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config.toml
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    let log_file = config
        .log_file
        .as_deref()
        .map(|f| platform_paths.log_file_path(f));
    if let Some(parent) = log_file.as_deref().and_then(|p| p.parent()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Cannot create log directory '{}': {e}", parent.display());
        }
    }
    let log_file = log_file.map(|p| p.to_string_lossy().into_owned());

    // Initialise logging subsystem
    util::logging::init(cli.debug, config.log_level.as_deref(), log_file.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %platform_paths.config_file().display(),
        "XsimWatch starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // A project given on the command line replaces window detection.
    let initial_project = match cli.project {
        Some(path) => match Project::from_project_file(&path) {
            Some(project) => {
                if !path.is_file() {
                    tracing::warn!(file = %path.display(), "Project file does not exist yet");
                }
                Some(project)
            }
            None => {
                tracing::error!(file = %path.display(), "Not a usable project file path");
                eprintln!("Error: '{}' is not a project file path", path.display());
                std::process::exit(2);
            }
        },
        None => None,
    };

    let poll_interval = Duration::from_millis(cli.interval_ms.unwrap_or(config.poll_interval_ms));
    let settings = app::monitor::MonitorSettings {
        poll_interval,
        host_app_name: cli.host_app.unwrap_or(config.host_app_name),
        log_names: config.log_names,
    };

    // Create application state
    let mut state = app::state::AppState::new(config.raise_on_error, config.font_size);
    for warning in config_warnings {
        state.push_system_log(DiagnosticLevel::Error, warning);
    }

    let monitor = app::monitor::MonitorHandle::start(
        settings,
        Box::new(platform::fs::StdFileSystem),
        Box::new(platform::window_titles::DesktopWindowTitles),
        initial_project,
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size(ui::theme::WINDOW_SIZE)
            .with_min_inner_size(ui::theme::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    let editor = config.editor;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(gui::XsimWatchApp::new(
                state,
                monitor,
                editor,
                poll_interval,
            )))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch XsimWatch GUI: {e}");
        std::process::exit(1);
    }
}
