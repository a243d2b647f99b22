//! Input directory validation.
//!
//! Checks every `.md` file in the input directory without building
//! anything. Two independent checks run per file:
//!
//! - **Filename**: must match [`naming::FILENAME_PATTERN`].
//! - **Content**: the front matter must close and must fit the
//!   [`FrontMatter`](crate::frontmatter::FrontMatter) shape (`title` and
//!   `date` strings, `draft` a boolean, and so on).
//!
//! Problems are collected rather than returned early, so one run reports
//! every broken file. Drafts are validated like any other post.

use crate::frontmatter;
use crate::naming;
use crate::scan::{self, ScanError};
use std::fs;
use std::path::Path;

/// Which check a file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Filename,
    Content,
}

/// One failed check for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub filename: String,
    pub kind: IssueKind,
    pub message: String,
}

/// Outcome of validating an input directory.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Number of `.md` files examined.
    pub files_checked: usize,
    /// Every failed check, in file order; a file can appear twice.
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validate every post file in `input_dir`.
///
/// Only I/O failures are errors; invalid posts are reported in the
/// returned [`ValidationReport`].
pub fn validate_dir(input_dir: &Path) -> Result<ValidationReport, ScanError> {
    let mut filenames = scan::list_post_files(input_dir)?;
    filenames.reverse();

    let mut report = ValidationReport {
        files_checked: filenames.len(),
        issues: Vec::new(),
    };
    for filename in filenames {
        let path = input_dir.join(&filename);
        let raw = fs::read_to_string(&path).map_err(|source| ScanError::ReadPost {
            path: path.clone(),
            source,
        })?;
        report.issues.extend(check_file(&filename, &raw));
    }
    Ok(report)
}

/// Run both checks against one file's name and text.
pub fn check_file(filename: &str, raw: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !naming::is_valid_post_filename(filename) {
        issues.push(Issue {
            filename: filename.to_string(),
            kind: IssueKind::Filename,
            message: naming::FILENAME_HINT.to_string(),
        });
    }
    if let Err(e) = frontmatter::parse(raw) {
        issues.push(Issue {
            filename: filename.to_string(),
            kind: IssueKind::Content,
            message: e.to_string(),
        });
    }
    issues
}
