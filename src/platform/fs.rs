// XsimWatch - platform/fs.rs
//
// Real filesystem implementation of `core::fs::FileSystem`, plus helpers for
// handing paths to the OS.

use crate::core::fs::FileSystem;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// `FileSystem` backed by `std::fs` and `walkdir`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn list_subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        // walkdir reports a missing root as its first item, so NotFound
        // propagates with its original kind.
        let walker = walkdir::WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut dirs = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) if e.depth() == 0 => return Err(io::Error::from(e)),
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }
        Ok(dirs)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        read_file_lossy(path)
    }
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Open `path` with the OS default handler.
///
/// Goes through `open::that`, which hands the path to the platform launcher
/// as a single argument (ShellExecute on Windows, `open` on macOS,
/// `xdg-open` and friends elsewhere). No shell parses the path, so text
/// lifted from a log cannot inject commands.
pub fn open_with_default_handler(path: &Path) -> io::Result<()> {
    open::that(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_subdirectories_sorted_dirs_only() {
        let dir = TempDir::new().expect("tmpdir");
        fs::create_dir(dir.path().join("sim_2")).unwrap();
        fs::create_dir(dir.path().join("sim_1")).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir_all(dir.path().join("sim_1").join("nested")).unwrap();

        let dirs = StdFileSystem.list_subdirectories(dir.path()).unwrap();
        assert_eq!(
            dirs,
            vec![dir.path().join("sim_1"), dir.path().join("sim_2")]
        );
    }

    #[test]
    fn test_list_missing_directory_is_not_found() {
        let dir = TempDir::new().expect("tmpdir");
        let err = StdFileSystem
            .list_subdirectories(&dir.path().join("absent"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_lossy_replaces_invalid_utf8() {
        let dir = TempDir::new().expect("tmpdir");
        let path = dir.path().join("bad.log");
        fs::write(&path, b"ERROR \xff\xfe here").unwrap();
        let text = StdFileSystem.read_to_string(&path).unwrap();
        assert!(text.starts_with("ERROR "));
        assert!(text.ends_with(" here"));
    }

    #[test]
    fn test_modified_and_is_file() {
        let dir = TempDir::new().expect("tmpdir");
        let path = dir.path().join("a.log");
        assert!(!StdFileSystem.is_file(&path));
        assert!(StdFileSystem.modified(&path).is_err());
        fs::write(&path, "x").unwrap();
        assert!(StdFileSystem.is_file(&path));
        assert!(StdFileSystem.modified(&path).is_ok());
        assert!(!StdFileSystem.is_file(dir.path()));
    }
}
