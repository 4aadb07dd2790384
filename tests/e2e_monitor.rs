// XsimWatch - tests/e2e_monitor.rs
//
// End-to-end tests for the monitor pipeline on a real filesystem.
//
// A throwaway project tree is built under a temp dir with the xsim layout
// (<project>.sim/<run>/behav/xsim/<log>.log). File mtimes are set explicitly
// so change detection does not depend on filesystem timestamp granularity.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use xsimwatch::app::monitor::{Monitor, MonitorSettings};
use xsimwatch::core::host::FixedWindowTitles;
use xsimwatch::core::layout;
use xsimwatch::core::model::{LineSeverity, MonitorEvent, Project};
use xsimwatch::platform::fs::StdFileSystem;

// =============================================================================
// Helpers
// =============================================================================

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs)
}

/// Write a log into the xsim layout and pin its mtime.
fn write_log(root: &Path, run: &str, log: &str, content: &str, secs: u64) -> PathBuf {
    let run_dir = layout::sim_dir(root, "demo").join(run);
    let path = layout::log_path(&run_dir, log);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    let file = fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(at(secs)).unwrap();
    path
}

fn project_in(dir: &TempDir) -> Project {
    let file = dir.path().join("demo.xpr");
    fs::write(&file, "<Project/>").unwrap();
    Project::new("demo", file)
}

fn start(
    project: Option<Project>,
    titles: Vec<String>,
) -> (Monitor, mpsc::Receiver<MonitorEvent>) {
    let (tx, rx) = mpsc::channel();
    let monitor = Monitor::new(
        &MonitorSettings::default(),
        Box::new(StdFileSystem),
        Box::new(FixedWindowTitles { titles }),
        project,
        tx,
    );
    (monitor, rx)
}

fn updated(rx: &mpsc::Receiver<MonitorEvent>) -> Vec<xsimwatch::core::model::CurrentLog> {
    rx.try_iter()
        .filter_map(|e| match e {
            MonitorEvent::CurrentLogUpdated(log) => Some(log),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Monitor E2E
// =============================================================================

/// The project is found from a window title and its failing log is shown.
#[test]
fn e2e_window_title_to_classified_log() {
    // Titles carry the path as one whitespace-free token, so build the tree
    // under the target dir with a fixed prefix instead of the system temp dir.
    let dir = tempfile::Builder::new()
        .prefix("xsimwatch_e2e")
        .tempdir_in(env!("CARGO_TARGET_TMPDIR"))
        .expect("tmpdir");
    let project = project_in(&dir);
    assert!(
        !project
            .project_file
            .to_string_lossy()
            .contains(char::is_whitespace),
        "project path must not contain whitespace: {}",
        project.project_file.display()
    );
    let title = format!(
        "demo - [{}] - Vivado 2023.2",
        project.project_file.display()
    );

    let content = fs::read_to_string(fixture("xvlog_error.log")).unwrap();
    let xvlog = write_log(dir.path(), "sim_1", "xvlog", &content, 10);

    let (mut monitor, rx) = start(None, vec!["Files".to_string(), title]);
    monitor.tick(false).unwrap();

    assert_eq!(monitor.project(), Some(&project));
    let logs = updated(&rx);
    assert_eq!(logs.len(), 1);
    let log = &logs[0];
    assert_eq!(log.path, xvlog);

    let severities: Vec<_> = log.lines.iter().map(|l| l.severity).collect();
    assert_eq!(
        severities,
        vec![
            LineSeverity::Normal,
            LineSeverity::Normal,
            LineSeverity::Warning,
            LineSeverity::Error,
            LineSeverity::Error,
            LineSeverity::Normal,
        ]
    );

    // Analyzing line names a file but has no line number: no link.
    assert!(log.lines[0].reference().is_none());
    let warning_ref = log.lines[2].reference().unwrap();
    assert_eq!(warning_ref.line_number, 17);
    let error_ref = log.lines[3].reference().unwrap();
    assert_eq!(
        error_ref.file_path,
        PathBuf::from("C:/work/demo/demo.srcs/sources_1/new/core.sv")
    );
    assert_eq!(error_ref.line_number, 88);
    assert_eq!(log.lines[3].suffix(), "]");
}

/// Logs appearing after the project is adopted are picked up on later ticks.
#[test]
fn e2e_late_simulation_run_is_discovered() {
    let dir = TempDir::new().expect("tmpdir");
    let (mut monitor, rx) = start(Some(project_in(&dir)), Vec::new());

    monitor.tick(false).unwrap();
    assert!(monitor.registry().is_empty());

    let elab = write_log(dir.path(), "sim_1", "elaborate", "INFO: ok\n", 10);
    monitor.tick(false).unwrap();
    assert!(monitor.registry().contains(&elab));
    assert!(updated(&rx).is_empty());

    write_log(dir.path(), "sim_1", "elaborate", "ERROR: [XSIM 43-3322] boom\n", 20);
    monitor.tick(false).unwrap();
    assert_eq!(monitor.current_log(), Some(elab.as_path()));
}

/// Two error logs changing in the same tick: the later one in discovery
/// order wins. A later change to the first one brings it back.
#[test]
fn e2e_last_changed_error_log_wins() {
    let dir = TempDir::new().expect("tmpdir");
    let a = write_log(dir.path(), "sim_1", "elaborate", "ERROR: a\n", 10);
    let b = write_log(dir.path(), "sim_2", "xvlog", "ERROR: b\n", 10);
    let (mut monitor, rx) = start(Some(project_in(&dir)), Vec::new());

    monitor.tick(false).unwrap();
    assert_eq!(monitor.registry().paths(), vec![a.clone(), b.clone()]);
    assert_eq!(monitor.current_log(), Some(b.as_path()));

    // Nothing changed: nothing re-published.
    let _ = updated(&rx);
    monitor.tick(false).unwrap();
    assert!(updated(&rx).is_empty());

    write_log(dir.path(), "sim_1", "elaborate", "ERROR: a again\n", 30);
    monitor.tick(false).unwrap();
    assert_eq!(monitor.current_log(), Some(a.as_path()));
}

/// Rewriting the shown log without an error clears the view.
#[test]
fn e2e_fixed_log_clears_view() {
    let dir = TempDir::new().expect("tmpdir");
    write_log(dir.path(), "sim_1", "xvlog", "ERROR: first\n", 10);
    let (mut monitor, rx) = start(Some(project_in(&dir)), Vec::new());
    monitor.tick(false).unwrap();
    assert!(monitor.current_log().is_some());
    let _ = rx.try_iter().count();

    write_log(dir.path(), "sim_1", "xvlog", "INFO: all good\n", 20);
    monitor.tick(false).unwrap();
    assert!(monitor.current_log().is_none());
    assert!(rx.try_iter().any(|e| matches!(e, MonitorEvent::LogCleared)));
}

/// Re-running discovery on an unchanged tree gives the same list.
#[test]
fn e2e_discovery_is_stable() {
    let dir = TempDir::new().expect("tmpdir");
    write_log(dir.path(), "sim_2", "xvlog", "x", 10);
    write_log(dir.path(), "sim_1", "xvlog", "x", 10);
    write_log(dir.path(), "sim_1", "elaborate", "x", 10);
    let names: Vec<String> = vec!["elaborate".into(), "xvlog".into()];

    let first = layout::discover(&StdFileSystem, dir.path(), "demo", &names).unwrap();
    let second = layout::discover(&StdFileSystem, dir.path(), "demo", &names).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert!(first[0].ends_with("elaborate.log"));
}
