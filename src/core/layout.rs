// XsimWatch - core/layout.rs
//
// Log set discovery for the conventional xsim output layout:
//
//   <root>/<project>.sim/<run>/behav/xsim/<log>.log
//
// Every subdirectory of the .sim directory is treated as a simulation run
// (sim_1, sim_2, ...). Only candidate files that exist right now are returned.
// A missing .sim directory is the normal state before the first simulation
// build and yields an empty set.

use crate::core::fs::FileSystem;
use crate::util::constants;
use crate::util::error::DiscoveryError;
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Path of the simulation output directory for a project.
pub fn sim_dir(root: &Path, project_name: &str) -> PathBuf {
    root.join(format!("{project_name}{}", constants::SIM_DIR_SUFFIX))
}

/// Path of one log file inside a simulation run directory.
pub fn log_path(run_dir: &Path, log_name: &str) -> PathBuf {
    let mut path = run_dir.to_path_buf();
    for part in constants::XSIM_SUBDIRS {
        path.push(part);
    }
    path.push(format!("{log_name}.{}", constants::LOG_EXTENSION));
    path
}

/// Discover the existing log files of every simulation run of a project.
///
/// Runs are visited in name order and log names in the given order, so the
/// result order is stable across calls on an unchanged tree.
///
/// # Errors
/// Returns `DiscoveryError::ListDir` only when the .sim directory exists but
/// cannot be listed. A missing directory is `Ok(vec![])`.
pub fn discover(
    fs: &dyn FileSystem,
    root: &Path,
    project_name: &str,
    log_names: &[String],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let sim = sim_dir(root, project_name);

    let runs = match fs.list_subdirectories(&sim) {
        Ok(runs) => runs,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::trace!(dir = %sim.display(), "Simulation directory not present yet");
            return Ok(Vec::new());
        }
        Err(source) => return Err(DiscoveryError::ListDir { path: sim, source }),
    };

    let mut found = Vec::new();
    for run in &runs {
        for name in log_names {
            let candidate = log_path(run, name);
            if fs.is_file(&candidate) && !found.contains(&candidate) {
                found.push(candidate);
            }
        }
    }

    tracing::trace!(
        dir = %sim.display(),
        runs = runs.len(),
        logs = found.len(),
        "Log set discovery complete"
    );
    Ok(found)
}

// =============================================================================
// Display labels
// =============================================================================

/// Run directory and log name recovered from a discovered log path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLabel {
    /// Simulation run directory name (e.g. "sim_1").
    pub run: String,
    /// Log file stem (e.g. "elaborate").
    pub log_name: String,
}

impl std::fmt::Display for LogLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.run, self.log_name)
    }
}

/// Recover the run and log name from a path in the xsim layout.
///
/// Backslashes are normalised first so Windows paths are accepted. Returns
/// `None` for paths outside the layout.
pub fn describe_log_path(path: &Path) -> Option<LogLabel> {
    static LAYOUT: OnceLock<Regex> = OnceLock::new();
    let re = LAYOUT.get_or_init(|| {
        Regex::new(r"^.*\.sim/(?P<run>[^/]*)/behav/xsim/(?P<log>[^./]*)\.log$")
            .expect("describe_log_path: invalid regex")
    });

    let normalised = path.to_string_lossy().replace('\\', "/");
    let caps = re.captures(&normalised)?;
    Some(LogLabel {
        run: caps["run"].to_string(),
        log_name: caps["log"].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fs::StdFileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn default_names() -> Vec<String> {
        constants::DEFAULT_LOG_NAMES
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    /// Create `<root>/demo.sim/<run>/behav/xsim/<log>.log`.
    fn touch_log(root: &Path, run: &str, log: &str) -> PathBuf {
        let path = log_path(&sim_dir(root, "demo").join(run), log);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_missing_sim_dir_is_empty_not_error() {
        let dir = TempDir::new().expect("tmpdir");
        let found = discover(&StdFileSystem, dir.path(), "demo", &default_names()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_discovers_existing_logs_in_run_and_name_order() {
        let dir = TempDir::new().expect("tmpdir");
        let b_xvlog = touch_log(dir.path(), "sim_2", "xvlog");
        let a_elab = touch_log(dir.path(), "sim_1", "elaborate");
        let a_xvlog = touch_log(dir.path(), "sim_1", "xvlog");
        // Not a recognised log name.
        touch_log(dir.path(), "sim_1", "simulate");

        let found = discover(&StdFileSystem, dir.path(), "demo", &default_names()).unwrap();
        assert_eq!(found, vec![a_elab, a_xvlog, b_xvlog]);
    }

    #[test]
    fn test_run_without_logs_contributes_nothing() {
        let dir = TempDir::new().expect("tmpdir");
        fs::create_dir_all(sim_dir(dir.path(), "demo").join("sim_1")).unwrap();
        let found = discover(&StdFileSystem, dir.path(), "demo", &default_names()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_rediscovery_of_unchanged_tree_is_identical() {
        let dir = TempDir::new().expect("tmpdir");
        touch_log(dir.path(), "sim_1", "elaborate");
        touch_log(dir.path(), "sim_1", "xvlog");
        touch_log(dir.path(), "sim_3", "elaborate");

        let first = discover(&StdFileSystem, dir.path(), "demo", &default_names()).unwrap();
        let second = discover(&StdFileSystem, dir.path(), "demo", &default_names()).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_log_names_do_not_duplicate_paths() {
        let dir = TempDir::new().expect("tmpdir");
        touch_log(dir.path(), "sim_1", "xvlog");
        let names = vec!["xvlog".to_string(), "xvlog".to_string()];
        let found = discover(&StdFileSystem, dir.path(), "demo", &names).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_describe_log_path() {
        let label =
            describe_log_path(Path::new("C:/proj/demo.sim/sim_1/behav/xsim/elaborate.log"))
                .unwrap();
        assert_eq!(label.run, "sim_1");
        assert_eq!(label.log_name, "elaborate");
        assert_eq!(label.to_string(), "sim_1/elaborate");

        let windows =
            describe_log_path(Path::new(r"C:\proj\demo.sim\sim_2\behav\xsim\xvlog.log")).unwrap();
        assert_eq!(windows.to_string(), "sim_2/xvlog");

        assert!(describe_log_path(Path::new("/tmp/other.log")).is_none());
    }
}
