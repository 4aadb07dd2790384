// XsimWatch - core/fs.rs
//
// Filesystem capability consumed by discovery, the registry, and the monitor.
// Keeps the core layer free of direct I/O so the polling state machine can be
// tested against an in-memory tree. The real implementation lives in
// `platform::fs::StdFileSystem`.
//
// Every call may fail independently; callers decide which failures are
// expected (missing directory, deleted file) and which are not.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Filesystem operations needed by the monitor.
pub trait FileSystem: Send {
    /// Immediate subdirectories of `dir`, sorted by name.
    ///
    /// A missing `dir` must surface as `io::ErrorKind::NotFound`.
    fn list_subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Whether `path` currently exists as a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Last modification time of `path`.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Whole-file text content. Invalid UTF-8 is replaced, never rejected.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}
