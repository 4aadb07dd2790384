// XsimWatch - core/host.rs
//
// Host application detection from top-level window titles.
//
// The host tool shows its open project in the title bar, e.g.
//   edit_core_v1_0 - [D:/work/edit_core/edit_core_v1_0.xpr] - Vivado 2017.4
// Matching is a pure function of the title list; listing the titles is a
// separate capability (`WindowTitleSource`) implemented per platform.

use crate::core::model::Project;
use crate::util::constants;
use crate::util::error::HostError;
use regex::Regex;
use std::path::PathBuf;

/// Capability: list the titles of visible top-level windows.
///
/// Enumeration order is whatever the platform yields.
pub trait WindowTitleSource: Send {
    fn visible_window_titles(&self) -> Result<Vec<String>, HostError>;
}

/// A successful title match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMatch {
    pub project_name: String,
    pub project_file: PathBuf,
}

impl HostMatch {
    /// Convert into the project the monitor should watch.
    pub fn into_project(self) -> Project {
        Project::new(self.project_name, self.project_file)
    }
}

/// Matches host window titles of the form
/// `<project> - [<path>.xpr] - <host app> ...`.
#[derive(Debug, Clone)]
pub struct HostLocator {
    pattern: Regex,
}

impl HostLocator {
    /// Build a locator for the given host application name (e.g. "Vivado").
    pub fn new(host_app_name: &str) -> Self {
        let source = format!(
            r"^(?P<project>\S*) - \[(?P<path>\S*\.{ext})\] - {app}.*$",
            ext = regex::escape(constants::PROJECT_FILE_EXTENSION),
            app = regex::escape(host_app_name),
        );
        // Both interpolated parts are escaped, so the pattern always compiles.
        let pattern = Regex::new(&source).expect("HostLocator: invalid title regex");
        Self { pattern }
    }

    /// Return the first title that names a host project, if any.
    pub fn locate<S: AsRef<str>>(&self, titles: &[S]) -> Option<HostMatch> {
        titles.iter().find_map(|title| {
            let caps = self.pattern.captures(title.as_ref())?;
            Some(HostMatch {
                project_name: caps["project"].to_string(),
                project_file: PathBuf::from(&caps["path"]),
            })
        })
    }
}

impl Default for HostLocator {
    fn default() -> Self {
        Self::new(constants::DEFAULT_HOST_APP_NAME)
    }
}

/// Window title source returning a fixed list. Used when titles come from
/// somewhere other than the desktop (tests, replayed sessions).
#[derive(Debug, Clone, Default)]
pub struct FixedWindowTitles {
    pub titles: Vec<String>,
}

impl WindowTitleSource for FixedWindowTitles {
    fn visible_window_titles(&self) -> Result<Vec<String>, HostError> {
        Ok(self.titles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_extracts_project_and_path() {
        let locator = HostLocator::new("HostApp");
        let found = locator
            .locate(&["demo - [C:/proj/demo.xpr] - HostApp 2023.1"])
            .expect("title should match");
        assert_eq!(found.project_name, "demo");
        assert_eq!(found.project_file, PathBuf::from("C:/proj/demo.xpr"));
    }

    #[test]
    fn test_locate_default_host_name() {
        let locator = HostLocator::default();
        let found = locator
            .locate(&["edit_core_v1_0 - [D:/work/edit_core/edit_core_v1_0.xpr] - Vivado 2017.4"])
            .unwrap();
        assert_eq!(found.project_name, "edit_core_v1_0");
        let project = found.into_project();
        assert_eq!(project.root_dir, PathBuf::from("D:/work/edit_core"));
    }

    #[test]
    fn test_locate_returns_none_without_match() {
        let locator = HostLocator::new("Vivado");
        let titles = [
            "Untitled - Notepad",
            "demo - [C:/proj/demo.xpr] - Quartus",
            "demo - [C:/proj/demo.qpf] - Vivado 2023.1",
            "my demo - [C:/proj/demo.xpr] - Vivado 2023.1",
        ];
        assert_eq!(locator.locate(&titles), None);
        assert_eq!(locator.locate::<&str>(&[]), None);
    }

    #[test]
    fn test_locate_first_match_wins() {
        let locator = HostLocator::new("Vivado");
        let titles = vec![
            "Terminal".to_string(),
            "alpha - [C:/a/alpha.xpr] - Vivado 2023.1".to_string(),
            "beta - [C:/b/beta.xpr] - Vivado 2023.1".to_string(),
        ];
        assert_eq!(locator.locate(&titles).unwrap().project_name, "alpha");
    }

    #[test]
    fn test_host_name_is_matched_literally() {
        let locator = HostLocator::new("Viv.do");
        assert!(locator.locate(&["p - [C:/p.xpr] - Vivado"]).is_none());
        assert!(locator.locate(&["p - [C:/p.xpr] - Viv.do"]).is_some());
    }

    #[test]
    fn test_fixed_titles_source() {
        let source = FixedWindowTitles {
            titles: vec!["a".to_string()],
        };
        assert_eq!(source.visible_window_titles().unwrap(), vec!["a"]);
    }
}
