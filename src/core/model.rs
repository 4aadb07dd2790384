// XsimWatch - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers: the monitor thread
// produces them, the UI thread only ever receives owned snapshots of them.

use chrono::{DateTime, Utc};
use std::ops::Range;
use std::path::{Path, PathBuf};

// =============================================================================
// Project
// =============================================================================

/// The host tool project being monitored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project name as shown in the host window title.
    pub name: String,

    /// Path to the `.xpr` project file.
    pub project_file: PathBuf,

    /// Directory containing the project file; the simulation tree lives here.
    pub root_dir: PathBuf,
}

impl Project {
    /// Build a project from its name and project file path. The root directory
    /// is the parent of the project file (empty if the path has no parent).
    pub fn new(name: impl Into<String>, project_file: impl Into<PathBuf>) -> Self {
        let project_file = project_file.into();
        let root_dir = project_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            name: name.into(),
            project_file,
            root_dir,
        }
    }

    /// Build a project from a project file path alone, using its file stem as
    /// the project name. Returns `None` when the path has no file stem.
    pub fn from_project_file(project_file: impl Into<PathBuf>) -> Option<Self> {
        let project_file = project_file.into();
        let name = project_file.file_stem()?.to_string_lossy().into_owned();
        Some(Self::new(name, project_file))
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Severity of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineSeverity {
    #[default]
    Normal,
    Warning,
    Error,
}

impl LineSeverity {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            LineSeverity::Normal => "Normal",
            LineSeverity::Warning => "Warning",
            LineSeverity::Error => "Error",
        }
    }
}

impl std::fmt::Display for LineSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A source location embedded in a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    /// Referenced source file, exactly as written in the log.
    pub file_path: PathBuf,

    /// 1-based line number in the referenced file.
    pub line_number: u32,
}

/// A clickable reference span inside a classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSpan {
    /// Byte range of the reference text (`path:line`) inside the line.
    pub range: Range<usize>,

    /// Parsed location.
    pub reference: SourceReference,
}

/// One line of a log file after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Raw line text without terminator.
    pub text: String,

    pub severity: LineSeverity,

    /// Clickable reference, if the line contains one.
    pub link: Option<ReferenceSpan>,
}

impl ClassifiedLine {
    /// The parsed source reference, if any.
    pub fn reference(&self) -> Option<&SourceReference> {
        self.link.as_ref().map(|l| &l.reference)
    }

    /// Plain text before the reference span (the whole line if there is none).
    pub fn prefix(&self) -> &str {
        match &self.link {
            Some(l) => &self.text[..l.range.start],
            None => &self.text,
        }
    }

    /// Text of the reference span itself (empty if there is none).
    pub fn span_text(&self) -> &str {
        match &self.link {
            Some(l) => &self.text[l.range.clone()],
            None => "",
        }
    }

    /// Plain text after the reference span (empty if there is none).
    pub fn suffix(&self) -> &str {
        match &self.link {
            Some(l) => &self.text[l.range.end..],
            None => "",
        }
    }
}

/// Output of classifying the full text of one log file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Whether any line carries the error marker.
    pub contains_error: bool,

    /// Every line in file order, including blank ones.
    pub lines: Vec<ClassifiedLine>,
}

// =============================================================================
// Current log snapshot
// =============================================================================

/// Immutable snapshot of the log currently selected for display.
#[derive(Debug, Clone)]
pub struct CurrentLog {
    pub path: PathBuf,
    pub lines: Vec<ClassifiedLine>,
    /// Modification time of the file when it was read.
    pub observed_at: DateTime<Utc>,
}

// =============================================================================
// Monitor events (for UI updates)
// =============================================================================

/// Severity of a diagnostic line shown in the system log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Error,
}

/// Messages sent from the monitor thread to the UI thread.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// A host window was matched and its project adopted.
    ProjectFound { name: String, project_file: PathBuf },

    /// A log file was registered for the first time.
    LogDiscovered { path: PathBuf },

    /// The displayed log changed on disk; its old content is stale.
    LogCleared,

    /// A new log containing an error was selected for display.
    CurrentLogUpdated(CurrentLog),

    /// A line for the system log panel.
    Diagnostic {
        message: String,
        level: DiagnosticLevel,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root_is_parent_of_project_file() {
        let project = Project::new("demo", "C:/proj/demo.xpr");
        assert_eq!(project.root_dir, PathBuf::from("C:/proj"));
        assert_eq!(project.name, "demo");
    }

    #[test]
    fn test_project_from_file_uses_stem() {
        let project = Project::from_project_file("/work/cpu/cpu_top.xpr").unwrap();
        assert_eq!(project.name, "cpu_top");
        assert_eq!(project.root_dir, PathBuf::from("/work/cpu"));
    }

    #[test]
    fn test_line_parts_without_link() {
        let line = ClassifiedLine {
            text: "plain".to_string(),
            severity: LineSeverity::Normal,
            link: None,
        };
        assert_eq!(line.prefix(), "plain");
        assert_eq!(line.span_text(), "");
        assert_eq!(line.suffix(), "");
        assert!(line.reference().is_none());
    }
}
