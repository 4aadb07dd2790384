// XsimWatch - core/registry.rs
//
// Known log files and the last modification time observed for each.
//
// Entries are kept in insertion (discovery) order and are never removed: a log
// that disappears from disk simply stops reporting changes. The recorded time
// only moves forward, so a file whose mtime goes backwards (restored from a
// backup, clock skew) is treated as unchanged.

use crate::core::fs::FileSystem;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One registered log file.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub path: PathBuf,
    /// Last modification time seen; `None` until the first observation.
    pub last_seen_modified: Option<SystemTime>,
}

/// Ordered set of log files with change detection.
#[derive(Debug, Default)]
pub struct LogRegistry {
    entries: Vec<LogEntry>,
    index: HashMap<PathBuf, usize>,
}

impl LogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `path` if it is not already known. Returns `true` when it was new.
    pub fn register(&mut self, path: PathBuf) -> bool {
        if self.index.contains_key(&path) {
            return false;
        }
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push(LogEntry {
            path,
            last_seen_modified: None,
        });
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered paths in discovery order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    /// Last modification time recorded for `path`.
    pub fn last_modified(&self, path: &Path) -> Option<SystemTime> {
        self.index
            .get(path)
            .and_then(|&i| self.entries[i].last_seen_modified)
    }

    /// Record `mtime` for `path` if it is strictly newer than what was seen
    /// before. Returns `true` when the recorded time advanced.
    ///
    /// Unknown paths are ignored and report `false`.
    pub fn observe(&mut self, path: &Path, mtime: SystemTime) -> bool {
        let Some(&i) = self.index.get(path) else {
            return false;
        };
        let entry = &mut self.entries[i];
        match entry.last_seen_modified {
            Some(seen) if mtime <= seen => false,
            _ => {
                entry.last_seen_modified = Some(mtime);
                true
            }
        }
    }

    /// Query the file's current mtime and record it via [`observe`].
    ///
    /// A file whose mtime cannot be read (deleted, locked) is reported as
    /// unchanged.
    ///
    /// [`observe`]: LogRegistry::observe
    pub fn changed_since(&mut self, path: &Path, fs: &dyn FileSystem) -> bool {
        match fs.modified(path) {
            Ok(mtime) => self.observe(path, mtime),
            Err(e) => {
                tracing::trace!(file = %path.display(), error = %e, "Cannot read mtime");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Minimal filesystem exposing a single mutable mtime per path.
    #[derive(Default)]
    struct MtimeFs {
        mtimes: Mutex<HashMap<PathBuf, SystemTime>>,
    }

    impl MtimeFs {
        fn set(&self, path: &str, secs: u64) {
            self.mtimes.lock().unwrap().insert(
                PathBuf::from(path),
                SystemTime::UNIX_EPOCH + Duration::from_secs(secs),
            );
        }
    }

    impl FileSystem for MtimeFs {
        fn list_subdirectories(&self, _dir: &Path) -> io::Result<Vec<PathBuf>> {
            Ok(Vec::new())
        }
        fn is_file(&self, path: &Path) -> bool {
            self.mtimes.lock().unwrap().contains_key(path)
        }
        fn modified(&self, path: &Path) -> io::Result<SystemTime> {
            self.mtimes
                .lock()
                .unwrap()
                .get(path)
                .copied()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_register_is_idempotent_and_ordered() {
        let mut reg = LogRegistry::new();
        assert!(reg.register(PathBuf::from("b.log")));
        assert!(reg.register(PathBuf::from("a.log")));
        assert!(!reg.register(PathBuf::from("b.log")));
        assert_eq!(reg.len(), 2);
        assert_eq!(
            reg.paths(),
            vec![PathBuf::from("b.log"), PathBuf::from("a.log")]
        );
        assert!(reg.last_modified(Path::new("a.log")).is_none());
    }

    #[test]
    fn test_changed_since_reports_each_advance_once() {
        let fs = MtimeFs::default();
        fs.set("x.log", 100);
        let mut reg = LogRegistry::new();
        reg.register(PathBuf::from("x.log"));
        let p = Path::new("x.log");

        // First observation moves past the "never" sentinel.
        assert!(reg.changed_since(p, &fs));
        assert!(!reg.changed_since(p, &fs));
        assert!(!reg.changed_since(p, &fs));

        fs.set("x.log", 101);
        assert!(reg.changed_since(p, &fs));
        assert!(!reg.changed_since(p, &fs));
        assert_eq!(
            reg.last_modified(p),
            Some(SystemTime::UNIX_EPOCH + Duration::from_secs(101))
        );
    }

    #[test]
    fn test_older_mtime_is_not_a_change() {
        let fs = MtimeFs::default();
        fs.set("x.log", 200);
        let mut reg = LogRegistry::new();
        reg.register(PathBuf::from("x.log"));
        assert!(reg.changed_since(Path::new("x.log"), &fs));

        fs.set("x.log", 150);
        assert!(!reg.changed_since(Path::new("x.log"), &fs));
        assert_eq!(
            reg.last_modified(Path::new("x.log")),
            Some(SystemTime::UNIX_EPOCH + Duration::from_secs(200))
        );
    }

    #[test]
    fn test_missing_file_is_unchanged_and_stays_registered() {
        let fs = MtimeFs::default();
        let mut reg = LogRegistry::new();
        reg.register(PathBuf::from("gone.log"));
        assert!(!reg.changed_since(Path::new("gone.log"), &fs));
        assert!(reg.contains(Path::new("gone.log")));
    }

    #[test]
    fn test_observe_unknown_path_is_ignored() {
        let mut reg = LogRegistry::new();
        assert!(!reg.observe(Path::new("nope.log"), SystemTime::now()));
        assert!(reg.is_empty());
    }
}
