// XsimWatch - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation. All errors preserve the causal chain for
// diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all XsimWatch operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum XsimWatchError {
    /// Host window enumeration failed.
    Host(HostError),

    /// Log set discovery failed.
    Discovery(DiscoveryError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Launching the external editor failed.
    Editor(EditorError),
}

impl fmt::Display for XsimWatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(e) => write!(f, "Host error: {e}"),
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Editor(e) => write!(f, "Editor error: {e}"),
        }
    }
}

impl std::error::Error for XsimWatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Host(e) => Some(e),
            Self::Discovery(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Editor(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Host errors
// ---------------------------------------------------------------------------

/// Errors raised while listing visible top-level window titles.
#[derive(Debug)]
pub enum HostError {
    /// The listing command could not be started.
    Spawn {
        program: &'static str,
        source: io::Error,
    },

    /// The listing command ran but exited unsuccessfully.
    CommandFailed {
        program: &'static str,
        status: String,
    },

    /// No window listing capability exists for this platform.
    Unsupported { platform: &'static str },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => {
                write!(f, "Cannot run '{program}' to list windows: {source}")
            }
            Self::CommandFailed { program, status } => {
                write!(f, "'{program}' failed to list windows ({status})")
            }
            Self::Unsupported { platform } => {
                write!(f, "Window title listing is not supported on {platform}")
            }
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<HostError> for XsimWatchError {
    fn from(e: HostError) -> Self {
        Self::Host(e)
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to log set discovery.
///
/// A missing simulation directory is not an error; see `core::layout::discover`.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The simulation directory exists but could not be listed.
    ListDir { path: PathBuf, source: io::Error },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListDir { path, source } => {
                write!(f, "Cannot list '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ListDir { source, .. } => Some(source),
        }
    }
}

impl From<DiscoveryError> for XsimWatchError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for XsimWatchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Editor errors
// ---------------------------------------------------------------------------

/// Errors raised when handing a source reference to an external program.
#[derive(Debug)]
pub enum EditorError {
    /// The configured editor command is empty.
    EmptyCommand,

    /// The editor or OS handler could not be started.
    Spawn { program: String, source: io::Error },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "[editor] command is empty"),
            Self::Spawn { program, source } => {
                write!(f, "Cannot start '{program}': {source}")
            }
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::EmptyCommand => None,
        }
    }
}

impl From<EditorError> for XsimWatchError {
    fn from(e: EditorError) -> Self {
        Self::Editor(e)
    }
}

/// Convenience type alias for XsimWatch results.
pub type Result<T> = std::result::Result<T, XsimWatchError>;
