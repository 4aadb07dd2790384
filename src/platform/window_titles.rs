// XsimWatch - platform/window_titles.rs
//
// Desktop implementation of `core::host::WindowTitleSource`.
//
// Platform behaviour:
// - **Windows**: PowerShell lists the main window title of every process that
//   has one (`Get-Process | Where-Object MainWindowTitle`). Those are the
//   visible top-level windows the host tool owns.
// - **Linux / BSD (X11)**: `wmctrl -l`, one window per line.
// - **Other**: reports `HostError::Unsupported`; pass the project file on the
//   command line instead.
//
// Each call spawns one short-lived process and waits for it.

use crate::core::host::WindowTitleSource;
use crate::util::error::HostError;

/// Lists window titles by shelling out to the platform's window tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopWindowTitles;

impl WindowTitleSource for DesktopWindowTitles {
    fn visible_window_titles(&self) -> Result<Vec<String>, HostError> {
        #[cfg(target_os = "windows")]
        {
            const PROGRAM: &str = "powershell";
            let stdout = run_listing(
                PROGRAM,
                &[
                    "-NoProfile",
                    "-NonInteractive",
                    "-WindowStyle",
                    "Hidden",
                    "-Command",
                    "Get-Process | Where-Object { $_.MainWindowTitle } | \
                     ForEach-Object { $_.MainWindowTitle }",
                ],
            )?;
            Ok(stdout
                .lines()
                .map(str::trim_end)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect())
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            const PROGRAM: &str = "wmctrl";
            let stdout = run_listing(PROGRAM, &["-l"])?;
            Ok(stdout.lines().filter_map(parse_wmctrl_line).collect())
        }
        #[cfg(not(any(target_os = "windows", all(unix, not(target_os = "macos")))))]
        {
            Err(HostError::Unsupported {
                platform: std::env::consts::OS,
            })
        }
    }
}

/// Run a listing command and return its stdout (lossy UTF-8).
#[cfg(any(target_os = "windows", all(unix, not(target_os = "macos"))))]
fn run_listing(program: &'static str, args: &[&str]) -> Result<String, HostError> {
    let mut command = std::process::Command::new(program);
    command.args(args);
    #[cfg(target_os = "windows")]
    {
        // A GUI-subsystem process would otherwise flash a console window on
        // every listing.
        use std::os::windows::process::CommandExt;
        command.creation_flags(crate::util::constants::CREATE_NO_WINDOW);
    }
    let output = command
        .output()
        .map_err(|source| HostError::Spawn { program, source })?;
    if !output.status.success() {
        return Err(HostError::CommandFailed {
            program,
            status: output.status.to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extract the title from one `wmctrl -l` line.
///
/// Format: `<window id> <desktop> <client machine> <title...>`. Sticky windows
/// use desktop `-1`. Lines with no title yield `None`.
pub fn parse_wmctrl_line(line: &str) -> Option<String> {
    let mut rest = line.trim_start();
    for _ in 0..3 {
        let end = rest.find(char::is_whitespace)?;
        rest = rest[end..].trim_start();
    }
    let title = rest.trim_end();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
