// XsimWatch - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Config validation ranges and layout names live here so they are auditable
// in one place.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "XsimWatch";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "XsimWatch";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Monitor loop
// =============================================================================

/// Period between two monitor ticks (ms).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Minimum user-configurable poll interval (ms).
pub const MIN_POLL_INTERVAL_MS: u64 = 250;

/// Maximum user-configurable poll interval (ms).
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000; // 60 s

/// Application name that must follow the project file in the host window title.
pub const DEFAULT_HOST_APP_NAME: &str = "Vivado";

/// Extension of the host project file embedded in the window title.
pub const PROJECT_FILE_EXTENSION: &str = "xpr";

// =============================================================================
// Simulation directory layout
// =============================================================================

/// Suffix appended to the project name to form the simulation output directory.
pub const SIM_DIR_SUFFIX: &str = ".sim";

/// Path components between a simulation run directory and its log files.
pub const XSIM_SUBDIRS: &[&str] = &["behav", "xsim"];

/// Extension of the simulator log files.
pub const LOG_EXTENSION: &str = "log";

/// Log file stems watched in every simulation run, in registration order.
pub const DEFAULT_LOG_NAMES: &[&str] = &["elaborate", "xvlog"];

/// Hard upper bound on the number of configured log names.
pub const MAX_LOG_NAMES: usize = 32;

// =============================================================================
// Classification
// =============================================================================

/// Substring marking a line (and its file) as containing an error.
pub const ERROR_MARKER: &str = "ERROR";

/// Substring marking a line as a warning.
pub const WARNING_MARKER: &str = "WARNING";

// =============================================================================
// Per-frame UI budgets
// =============================================================================

/// Maximum number of monitor events applied per UI frame. The rest stay queued
/// for the next frame.
pub const MAX_MONITOR_EVENTS_PER_FRAME: usize = 200;

/// Maximum number of lines kept in the system log panel.
pub const MAX_SYSTEM_LOG_LINES: usize = 1_000;

// =============================================================================
// UI defaults
// =============================================================================

/// Default log view font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 13.0;

/// Minimum user-configurable font size (points).
pub const MIN_FONT_SIZE: f32 = 8.0;

/// Maximum user-configurable font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Placeholder replaced by the referenced file path in editor arguments.
pub const EDITOR_FILE_PLACEHOLDER: &str = "{file}";

/// Placeholder replaced by the referenced line number in editor arguments.
pub const EDITOR_LINE_PLACEHOLDER: &str = "{line}";

// =============================================================================
// Process spawning
// =============================================================================

/// Win32 `CREATE_NO_WINDOW` process creation flag: run console helpers
/// (PowerShell window listing) without opening a console window.
pub const CREATE_NO_WINDOW: u32 = 0x0800_0000;
