// XsimWatch - platform/editor.rs
//
// "Open file at line" for clickable log references.
//
// Resolution order:
//   1. `[editor] command` from config.toml, with `{file}` / `{line}`
//      placeholders expanded in `[editor] args`.
//   2. The first known editor found on PATH (VS Code, Sublime Text,
//      Notepad++), invoked with its goto-line syntax.
//   3. The OS default handler for the file (no line positioning).
//
// Launch failures are returned to the UI, which reports them in the system
// log; they never affect the monitor.

use crate::core::model::SourceReference;
use crate::platform::fs;
use crate::util::constants::{EDITOR_FILE_PLACEHOLDER, EDITOR_LINE_PLACEHOLDER};
use crate::util::error::EditorError;
use std::path::{Path, PathBuf};

/// Editor settings from the `[editor]` config section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfig {
    /// Program to run. `None` means auto-detect.
    pub command: Option<String>,
    /// Argument templates for `command`. Empty means `["{file}:{line}"]`.
    pub args: Vec<String>,
}

/// Known editors probed on PATH, with their goto-line argument templates.
const KNOWN_EDITORS: &[(&str, &[&str])] = &[
    ("code", &["--goto", "{file}:{line}"]),
    ("subl", &["{file}:{line}"]),
    ("notepad++", &["-n{line}", "{file}"]),
];

/// Name used in messages for the OS default handler.
const DEFAULT_HANDLER: &str = "default handler";

/// What will be launched for a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    Editor { program: PathBuf, args: Vec<String> },
    DefaultHandler { file: PathBuf },
}

/// Replace the placeholders in each argument template.
pub fn expand_args<S: AsRef<str>>(templates: &[S], reference: &SourceReference) -> Vec<String> {
    let file = reference.file_path.to_string_lossy();
    let line = reference.line_number.to_string();
    templates
        .iter()
        .map(|t| {
            t.as_ref()
                .replace(EDITOR_FILE_PLACEHOLDER, &file)
                .replace(EDITOR_LINE_PLACEHOLDER, &line)
        })
        .collect()
}

/// Decide how to open `reference`. `lookup` resolves a program name on PATH.
pub fn plan_launch<F>(
    reference: &SourceReference,
    config: &EditorConfig,
    lookup: F,
) -> Result<LaunchPlan, EditorError>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    if let Some(command) = &config.command {
        let command = command.trim();
        if command.is_empty() {
            return Err(EditorError::EmptyCommand);
        }
        let args = if config.args.is_empty() {
            expand_args(&["{file}:{line}"], reference)
        } else {
            expand_args(&config.args, reference)
        };
        return Ok(LaunchPlan::Editor {
            program: PathBuf::from(command),
            args,
        });
    }

    for &(name, templates) in KNOWN_EDITORS {
        if let Some(program) = lookup(name) {
            return Ok(LaunchPlan::Editor {
                program,
                args: expand_args(templates, reference),
            });
        }
    }

    Ok(LaunchPlan::DefaultHandler {
        file: reference.file_path.clone(),
    })
}

/// Open `reference` in an editor, or with the OS default handler.
pub fn open_reference(
    reference: &SourceReference,
    config: &EditorConfig,
) -> Result<LaunchPlan, EditorError> {
    let plan = plan_launch(reference, config, find_on_path)?;
    match &plan {
        LaunchPlan::Editor { program, args } => {
            tracing::info!(
                program = %program.display(),
                file = %reference.file_path.display(),
                line = reference.line_number,
                "Opening reference in editor"
            );
            std::process::Command::new(program)
                .args(args)
                .spawn()
                .map_err(|source| EditorError::Spawn {
                    program: program.display().to_string(),
                    source,
                })?;
        }
        LaunchPlan::DefaultHandler { file } => {
            tracing::info!(file = %file.display(), "Opening reference with default handler");
            fs::open_with_default_handler(file).map_err(|source| EditorError::Spawn {
                program: DEFAULT_HANDLER.to_string(),
                source,
            })?;
        }
    }
    Ok(plan)
}

/// Locate an executable named `name` in the directories of `PATH`.
///
/// On Windows each extension from `PATHEXT` is also tried, so `code` finds
/// `code.cmd`.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    let extensions: Vec<String> = if cfg!(windows) {
        std::env::var("PATHEXT")
            .unwrap_or_else(|_| ".EXE;.CMD;.BAT".to_string())
            .split(';')
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        Vec::new()
    };

    std::env::split_paths(&path_var).find_map(|dir| find_in_dir(&dir, name, &extensions))
}

fn find_in_dir(dir: &Path, name: &str, extensions: &[String]) -> Option<PathBuf> {
    let plain = dir.join(name);
    if plain.is_file() {
        return Some(plain);
    }
    extensions
        .iter()
        .map(|ext| dir.join(format!("{name}{ext}")))
        .find(|candidate| candidate.is_file())
}
