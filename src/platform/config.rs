// XsimWatch - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::platform::editor::EditorConfig;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for XsimWatch configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/xsimwatch/ or %APPDATA%\XsimWatch\config\)
    pub config_dir: PathBuf,

    /// Data directory for log files.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            Self {
                config_dir: proj_dirs.config_dir().to_path_buf(),
                data_dir: proj_dirs.data_dir().to_path_buf(),
            }
        } else {
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Full path of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }

    /// Resolve the `[logging] file` setting. Relative paths live in the data
    /// directory.
    pub fn log_file_path(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[monitor]` section.
    pub monitor: MonitorSection,
    /// `[editor]` section.
    pub editor: EditorSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[monitor]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct MonitorSection {
    /// Poll period in ms.
    pub poll_interval_ms: Option<u64>,
    /// Application name expected in the host window title.
    pub host_app_name: Option<String>,
    /// Log file stems watched in each simulation run.
    pub log_names: Option<Vec<String>>,
}

/// `[editor]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct EditorSection {
    /// Editor executable.
    pub command: Option<String>,
    /// Argument templates with `{file}` and `{line}` placeholders.
    pub args: Option<Vec<String>>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Log view font size in points.
    pub font_size: Option<f32>,
    /// Bring the window to the front when a new error log is shown.
    pub raise_on_error: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Monitor --
    pub poll_interval_ms: u64,
    pub host_app_name: String,
    pub log_names: Vec<String>,

    // -- Editor --
    pub editor: EditorConfig,

    // -- UI --
    pub font_size: f32,
    pub raise_on_error: bool,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: constants::DEFAULT_POLL_INTERVAL_MS,
            host_app_name: constants::DEFAULT_HOST_APP_NAME.to_string(),
            log_names: constants::DEFAULT_LOG_NAMES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            editor: EditorConfig::default(),
            font_size: constants::DEFAULT_FONT_SIZE,
            raise_on_error: true,
            log_level: None,
            log_file: None,
        }
    }
}

/// Check a poll interval against the allowed range.
pub fn validate_poll_interval(ms: u64) -> Result<u64, ConfigError> {
    if (constants::MIN_POLL_INTERVAL_MS..=constants::MAX_POLL_INTERVAL_MS).contains(&ms) {
        Ok(ms)
    } else {
        Err(ConfigError::ValueOutOfRange {
            field: "poll_interval_ms".to_string(),
            value: ms.to_string(),
            expected: format!(
                "{}-{}",
                constants::MIN_POLL_INTERVAL_MS,
                constants::MAX_POLL_INTERVAL_MS
            ),
        })
    }
}

/// A log name must be a bare file stem: no separators, no extension dot.
fn is_valid_log_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\', '.'])
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning: the
/// application still starts but the user is informed.
///
/// Called before logging is initialised, so problems are only returned, not
/// logged here.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(source) => {
            let e = ConfigError::Io {
                path: config_path,
                source,
            };
            warnings.push(format!("{e}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let (config, mut parse_warnings) = parse_config(&content, &config_path);
    warnings.append(&mut parse_warnings);
    (config, warnings)
}

/// Parse and validate config.toml content. `path` is used in messages only.
pub fn parse_config(content: &str, path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(source) => {
            let e = ConfigError::TomlParse {
                path: path.to_path_buf(),
                source,
            };
            warnings.push(format!("{e}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    // -- Monitor: poll_interval_ms --
    if let Some(ms) = raw.monitor.poll_interval_ms {
        match validate_poll_interval(ms) {
            Ok(ms) => config.poll_interval_ms = ms,
            Err(e) => warnings.push(format!(
                "[monitor] {e}. Using default ({}).",
                constants::DEFAULT_POLL_INTERVAL_MS
            )),
        }
    }

    // -- Monitor: host_app_name --
    if let Some(name) = raw.monitor.host_app_name {
        let name = name.trim();
        if name.is_empty() {
            warnings.push(format!(
                "[monitor] host_app_name is empty. Using default ({}).",
                constants::DEFAULT_HOST_APP_NAME
            ));
        } else {
            config.host_app_name = name.to_string();
        }
    }

    // -- Monitor: log_names --
    if let Some(names) = raw.monitor.log_names {
        let invalid: Vec<&String> = names.iter().filter(|n| !is_valid_log_name(n)).collect();
        if names.is_empty() || names.len() > constants::MAX_LOG_NAMES {
            warnings.push(format!(
                "[monitor] log_names must list 1-{} names. Using default ({}).",
                constants::MAX_LOG_NAMES,
                constants::DEFAULT_LOG_NAMES.join(", ")
            ));
        } else if !invalid.is_empty() {
            warnings.push(format!(
                "[monitor] log_names contains invalid entries {invalid:?}; \
                 use bare file stems like \"elaborate\". Using default ({}).",
                constants::DEFAULT_LOG_NAMES.join(", ")
            ));
        } else {
            config.log_names = names;
        }
    }

    // -- Editor --
    if let Some(command) = raw.editor.command {
        if command.trim().is_empty() {
            warnings.push("[editor] command is empty. Auto-detecting an editor.".to_string());
        } else {
            config.editor.command = Some(command);
        }
    }
    if let Some(args) = raw.editor.args {
        config.editor.args = args;
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- UI: raise_on_error --
    if let Some(raise) = raw.ui.raise_on_error {
        config.raise_on_error = raise;
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    (config, warnings)
}
