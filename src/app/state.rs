// XsimWatch - app/state.rs
//
// View state for the window. Built only from `MonitorEvent`s via `apply`,
// plus a few UI-originated notes (editor launch results).
// Owned by the eframe::App implementation.

use crate::core::layout;
use crate::core::model::{CurrentLog, DiagnosticLevel, MonitorEvent};
use crate::util::constants;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::path::PathBuf;

/// One line in the system log panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemLogLine {
    pub message: String,
    pub level: DiagnosticLevel,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Project file of the watched project (None until the host is found).
    pub project_file: Option<PathBuf>,

    pub project_name: Option<String>,

    /// Every log path the monitor has registered, in discovery order.
    pub discovered_logs: Vec<PathBuf>,

    /// The log currently shown; `None` is the empty view.
    pub current: Option<CurrentLog>,

    /// Diagnostics, oldest first, capped at `MAX_SYSTEM_LOG_LINES`.
    pub system_log: VecDeque<SystemLogLine>,

    /// Set when a new log arrives; the log view consumes it.
    pub scroll_to_bottom: bool,

    /// Set when a new log arrives; the app focuses the window and clears it.
    pub raise_requested: bool,

    /// Bring the window forward when a new error log is shown.
    pub raise_on_error: bool,

    /// Base font size for the log view.
    pub font_size: f32,
}

impl AppState {
    /// Create the initial state, seeded with the startup banner.
    pub fn new(raise_on_error: bool, font_size: f32) -> Self {
        let mut state = Self {
            project_file: None,
            project_name: None,
            discovered_logs: Vec::new(),
            current: None,
            system_log: VecDeque::new(),
            scroll_to_bottom: false,
            raise_requested: false,
            raise_on_error,
            font_size,
        };
        for line in startup_banner() {
            state.push_system_log(DiagnosticLevel::Info, line);
        }
        state
    }

    /// Fold one monitor event into the view state.
    pub fn apply(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::ProjectFound { name, project_file } => {
                self.project_name = Some(name);
                self.project_file = Some(project_file);
            }
            MonitorEvent::LogDiscovered { path } => {
                if !self.discovered_logs.contains(&path) {
                    self.discovered_logs.push(path);
                }
            }
            MonitorEvent::LogCleared => {
                self.current = None;
            }
            MonitorEvent::CurrentLogUpdated(log) => {
                self.current = Some(log);
                self.scroll_to_bottom = true;
                if self.raise_on_error {
                    self.raise_requested = true;
                }
            }
            MonitorEvent::Diagnostic { message, level } => {
                self.push_system_log(level, message);
            }
        }
    }

    /// Append a line to the system log, dropping the oldest past the cap.
    pub fn push_system_log(&mut self, level: DiagnosticLevel, message: impl Into<String>) {
        self.system_log.push_back(SystemLogLine {
            message: message.into(),
            level,
        });
        while self.system_log.len() > constants::MAX_SYSTEM_LOG_LINES {
            self.system_log.pop_front();
        }
    }

    /// Header text for the project row: `<name> (<project file>)`.
    pub fn project_label(&self) -> String {
        match (&self.project_name, &self.project_file) {
            (Some(name), Some(path)) => format!("{name} ({})", path.display()),
            (None, Some(path)) => path.display().to_string(),
            _ => "No project: waiting for the host window".to_string(),
        }
    }

    /// Label for the current log: `<run>/<log> @ <local time>`.
    pub fn current_log_label(&self) -> Option<String> {
        let log = self.current.as_ref()?;
        let name = match layout::describe_log_path(&log.path) {
            Some(label) => label.to_string(),
            None => log.path.display().to_string(),
        };
        let local: DateTime<Local> = log.observed_at.with_timezone(&Local);
        Some(format!("{name} @ {}", local.format("%Y-%m-%d %H:%M:%S")))
    }
}

/// Lines shown at the top of the system log on startup.
pub fn startup_banner() -> Vec<String> {
    vec![
        format!("{} v{}", constants::APP_NAME, constants::APP_VERSION),
        "Watching for simulator error logs.".to_string(),
    ]
}
