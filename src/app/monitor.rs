// XsimWatch - app/monitor.rs
//
// The polling engine: finds the host project, discovers simulator logs,
// detects changed files, and decides which single log is shown.
//
// Architecture:
//   - `MonitorHandle` lives on the UI thread; `run_monitor` executes on a
//     background thread ticking on a fixed interval.
//   - `Monitor` owns all mutable monitor state (project, registry, current
//     log). Nothing else touches it; the UI only receives `MonitorEvent`
//     snapshots over an mpsc channel.
//   - The UI thread polls the channel each frame with a per-frame budget.
//   - An `Arc<AtomicBool>` lets the UI request a fresh host window search.
//
// Tick rules:
//   - Host not found and a missing .sim directory are normal states and stay
//     silent. Any error returned by a tick is reported as a diagnostic and the
//     loop carries on with the next tick.
//   - Registered logs are checked in discovery order. Among the files that
//     changed and contain an error in one tick, the last one checked wins.
//   - When the displayed log changes it is cleared before it is re-read.
//
// Known limitation: the registry records the new mtime before the file is
// read. If that read fails (file locked while the simulator writes it), the
// change is consumed and the log is not re-read until it changes again. A
// cleared log therefore stays cleared until some log is successfully read
// with an error in it.

use crate::core::classifier;
use crate::core::fs::FileSystem;
use crate::core::host::{HostLocator, WindowTitleSource};
use crate::core::layout;
use crate::core::model::{CurrentLog, DiagnosticLevel, MonitorEvent, Project};
use crate::core::registry::LogRegistry;
use crate::util::constants;
use crate::util::error;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// How often the sleeping monitor thread checks for a host search request (ms).
const SEARCH_CHECK_INTERVAL_MS: u64 = 100;

// =============================================================================
// Settings
// =============================================================================

/// Tunables for the monitor, resolved from config.toml and the CLI.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub poll_interval: Duration,
    pub host_app_name: String,
    pub log_names: Vec<String>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(constants::DEFAULT_POLL_INTERVAL_MS),
            host_app_name: constants::DEFAULT_HOST_APP_NAME.to_string(),
            log_names: constants::DEFAULT_LOG_NAMES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

// =============================================================================
// Monitor state machine
// =============================================================================

/// Exclusive owner of the monitor state. Driven one tick at a time.
pub struct Monitor {
    locator: HostLocator,
    host_app_name: String,
    log_names: Vec<String>,
    fs: Box<dyn FileSystem>,
    windows: Box<dyn WindowTitleSource>,
    project: Option<Project>,
    registry: LogRegistry,
    current: Option<PathBuf>,
    /// Set after a window listing failure has been reported, so a missing
    /// `wmctrl` is announced once instead of every second.
    host_error_reported: bool,
    tx: mpsc::Sender<MonitorEvent>,
    disconnected: bool,
}

impl Monitor {
    /// Create a monitor publishing to `tx`.
    ///
    /// When `initial_project` is given it is adopted immediately and window
    /// titles are only consulted again on an explicit search request.
    pub fn new(
        settings: &MonitorSettings,
        fs: Box<dyn FileSystem>,
        windows: Box<dyn WindowTitleSource>,
        initial_project: Option<Project>,
        tx: mpsc::Sender<MonitorEvent>,
    ) -> Self {
        let mut monitor = Self {
            locator: HostLocator::new(&settings.host_app_name),
            host_app_name: settings.host_app_name.clone(),
            log_names: settings.log_names.clone(),
            fs,
            windows,
            project: None,
            registry: LogRegistry::new(),
            current: None,
            host_error_reported: false,
            tx,
            disconnected: false,
        };
        if let Some(project) = initial_project {
            monitor.adopt_project(project);
        }
        monitor
    }

    /// The project being watched, if one is known.
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Path of the log currently shown, if any.
    pub fn current_log(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    pub fn registry(&self) -> &LogRegistry {
        &self.registry
    }

    /// `true` once the UI side has dropped its receiver.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// Publish a line to the system log panel.
    pub fn report(&mut self, level: DiagnosticLevel, message: impl Into<String>) {
        self.emit(MonitorEvent::Diagnostic {
            message: message.into(),
            level,
        });
    }

    fn emit(&mut self, event: MonitorEvent) {
        if self.tx.send(event).is_err() {
            self.disconnected = true;
        }
    }

    fn adopt_project(&mut self, project: Project) {
        tracing::info!(
            project = %project.name,
            file = %project.project_file.display(),
            "Host project adopted"
        );
        self.emit(MonitorEvent::ProjectFound {
            name: project.name.clone(),
            project_file: project.project_file.clone(),
        });
        let message = format!("{} found: {}", self.host_app_name, project.name);
        self.report(DiagnosticLevel::Info, message);
        self.project = Some(project);
    }

    /// Look for the host window when no project is known, or when `forced`.
    fn resolve_project(&mut self, forced: bool) {
        if self.project.is_some() && !forced {
            return;
        }

        let titles = match self.windows.visible_window_titles() {
            Ok(titles) => {
                self.host_error_reported = false;
                titles
            }
            Err(e) => {
                if self.host_error_reported {
                    tracing::debug!(error = %e, "Window listing still failing");
                } else {
                    tracing::warn!(error = %e, "Cannot list window titles");
                    self.host_error_reported = true;
                    self.report(DiagnosticLevel::Error, e.to_string());
                }
                return;
            }
        };

        match self.locator.locate(&titles) {
            Some(found) => {
                let project = found.into_project();
                if self.project.as_ref() != Some(&project) {
                    self.adopt_project(project);
                }
            }
            None => {
                tracing::trace!(windows = titles.len(), "No host window found");
                if forced {
                    let message = format!("No {} window found", self.host_app_name);
                    self.report(DiagnosticLevel::Info, message);
                }
            }
        }
    }

    /// Run one poll cycle.
    ///
    /// `search_host` forces a window title search even when a project is
    /// already known (the "Search" button).
    pub fn tick(&mut self, search_host: bool) -> error::Result<()> {
        self.resolve_project(search_host);
        let Some(project) = &self.project else {
            return Ok(());
        };
        let root = project.root_dir.clone();
        let name = project.name.clone();

        // -----------------------------------------------------------------
        // 1. Register newly produced log files.
        // -----------------------------------------------------------------
        let found = layout::discover(self.fs.as_ref(), &root, &name, &self.log_names)?;
        for path in found {
            if self.registry.register(path.clone()) {
                tracing::info!(file = %path.display(), "Log file registered");
                let message = format!("{} found", path.display());
                self.emit(MonitorEvent::LogDiscovered { path });
                self.report(DiagnosticLevel::Info, message);
            }
        }

        // -----------------------------------------------------------------
        // 2. Read every changed log in discovery order; remember the last
        //    one that contains an error.
        // -----------------------------------------------------------------
        let mut selected: Option<(PathBuf, String)> = None;
        for path in self.registry.paths() {
            if !self.registry.changed_since(&path, self.fs.as_ref()) {
                continue;
            }
            tracing::debug!(file = %path.display(), "Log file changed");

            if self.current.as_deref() == Some(path.as_path()) {
                self.current = None;
                self.emit(MonitorEvent::LogCleared);
                self.report(DiagnosticLevel::Info, "clear");
            }

            let text = match self.fs.read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(
                        file = %path.display(),
                        error = %e,
                        "Changed log unreadable; skipped this tick"
                    );
                    continue;
                }
            };

            if classifier::contains_error(&text) {
                selected = Some((path, text));
            }
        }

        // -----------------------------------------------------------------
        // 3. Publish the winner.
        // -----------------------------------------------------------------
        if let Some((path, text)) = selected {
            let classification = classifier::classify(&text);
            let observed_at = self
                .registry
                .last_modified(&path)
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(Utc::now);

            tracing::info!(
                file = %path.display(),
                lines = classification.lines.len(),
                "Error log selected"
            );
            self.current = Some(path.clone());
            let message = format!("load: {}", path.display());
            self.emit(MonitorEvent::CurrentLogUpdated(CurrentLog {
                path,
                lines: classification.lines,
                observed_at,
            }));
            self.report(DiagnosticLevel::Info, message);
        }

        Ok(())
    }
}

// =============================================================================
// MonitorHandle
// =============================================================================

/// UI-side handle to the background monitor thread.
///
/// Mirrors the start/poll interface of the other background workers: the UI
/// drains `poll_events` once per frame.
pub struct MonitorHandle {
    /// Channel receiver for monitor events.
    pub events_rx: Option<mpsc::Receiver<MonitorEvent>>,
    /// Set by the UI to request a host window search on the next tick.
    search_flag: Arc<AtomicBool>,
}

impl MonitorHandle {
    /// Spawn the monitor thread. It runs until the handle is dropped.
    pub fn start(
        settings: MonitorSettings,
        fs: Box<dyn FileSystem>,
        windows: Box<dyn WindowTitleSource>,
        initial_project: Option<Project>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let search_flag = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&search_flag);

        let monitor = Monitor::new(&settings, fs, windows, initial_project, tx);
        let interval = settings.poll_interval;
        std::thread::spawn(move || run_monitor(monitor, flag, interval));

        tracing::info!(
            interval_ms = settings.poll_interval.as_millis() as u64,
            host = %settings.host_app_name,
            "Monitor started"
        );

        Self {
            events_rx: Some(rx),
            search_flag,
        }
    }

    /// Ask the monitor to search for the host window on its next tick.
    pub fn request_host_search(&self) {
        self.search_flag.store(true, Ordering::SeqCst);
    }

    /// Returns `true` while the monitor thread is alive.
    pub fn is_active(&self) -> bool {
        self.events_rx.is_some()
    }

    /// Drain at most `max` pending events without blocking.
    pub fn poll_events(&mut self, max: usize) -> Vec<MonitorEvent> {
        let Some(rx) = &self.events_rx else {
            return Vec::new();
        };
        let mut events = Vec::with_capacity(max.min(8));
        while events.len() < max {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::warn!("Monitor thread exited");
                    self.events_rx = None;
                    break;
                }
            }
        }
        events
    }
}

// =============================================================================
// Background thread
// =============================================================================

/// Tick forever. Exits only when the UI has dropped its receiver.
fn run_monitor(mut monitor: Monitor, search_flag: Arc<AtomicBool>, interval: Duration) {
    let slice = Duration::from_millis(SEARCH_CHECK_INTERVAL_MS).min(interval);
    let slices = (interval.as_millis() / slice.as_millis().max(1)).max(1);

    loop {
        let search = search_flag.swap(false, Ordering::SeqCst);
        if let Err(e) = monitor.tick(search) {
            tracing::warn!(error = %e, "Monitor tick failed");
            monitor.report(DiagnosticLevel::Error, e.to_string());
        }
        if monitor.is_disconnected() {
            tracing::debug!("Monitor: receiver dropped, exiting");
            return;
        }

        // A search request cuts the wait short.
        for _ in 0..slices {
            if search_flag.load(Ordering::SeqCst) {
                break;
            }
            std::thread::sleep(slice);
        }
    }
}
