// XsimWatch - core/classifier.rs
//
// Line classification for simulator logs.
//
// Classification is plain substring matching: a line containing "ERROR" is an
// error, otherwise a line containing "WARNING" is a warning. Lines are split on
// every '\r' and every '\n' individually, so a CRLF terminator produces an
// extra empty line. The viewer shows those blank lines; they are kept.
//
// Reference extraction looks for a drive-letter path followed by `:<line>`,
// e.g. `C:/work/src/top.v:42`. The text before and after the reference is kept
// verbatim so the viewer can render `prefix | link | suffix`.

use crate::core::model::{
    Classification, ClassifiedLine, LineSeverity, ReferenceSpan, SourceReference,
};
use crate::util::constants::{ERROR_MARKER, WARNING_MARKER};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

fn reference_regex() -> &'static Regex {
    static REFERENCE: OnceLock<Regex> = OnceLock::new();
    REFERENCE.get_or_init(|| {
        // Greedy prefix: when a line holds several references the last one wins.
        Regex::new(
            r"^(?P<prefix>.*)(?P<reference>(?P<path>[A-Za-z]:(?:/.*)+.*):(?P<line>\d+))(?P<suffix>.*)$",
        )
        .expect("reference_regex: invalid regex")
    })
}

/// Whether the text contains the error marker anywhere.
pub fn contains_error(text: &str) -> bool {
    text.contains(ERROR_MARKER)
}

/// Severity of a single line.
pub fn line_severity(line: &str) -> LineSeverity {
    if line.contains(ERROR_MARKER) {
        LineSeverity::Error
    } else if line.contains(WARNING_MARKER) {
        LineSeverity::Warning
    } else {
        LineSeverity::Normal
    }
}

/// Find the source reference span in a line, if any.
pub fn find_reference(line: &str) -> Option<ReferenceSpan> {
    let caps = reference_regex().captures(line)?;
    let reference = caps.name("reference")?;
    // Digits that overflow u32 are not a usable line number.
    let line_number = caps["line"].parse::<u32>().ok()?;
    Some(ReferenceSpan {
        range: reference.range(),
        reference: SourceReference {
            file_path: PathBuf::from(&caps["path"]),
            line_number,
        },
    })
}

/// Classify one line.
pub fn classify_line(line: &str) -> ClassifiedLine {
    ClassifiedLine {
        text: line.to_string(),
        severity: line_severity(line),
        link: find_reference(line),
    }
}

/// Classify the full text of a log file.
pub fn classify(text: &str) -> Classification {
    let lines: Vec<ClassifiedLine> = text
        .split(|c: char| c == '\n' || c == '\r')
        .map(classify_line)
        .collect();
    let contains_error = lines.iter().any(|l| l.severity == LineSeverity::Error);
    Classification {
        contains_error,
        lines,
    }
}
