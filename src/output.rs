//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Posts are listed by title and position, newest first, with the source
//! file and snippet status as indented context lines. Untitled posts fall
//! back to their filename in parentheses, since that is their identity.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Posts
//! 001 Arpeggiator → 2026-02-05T21:38:22Z_arpeggiator/index.html
//!     Source: 2026-02-05T21:38:22Z_arpeggiator.md
//!     Snippet: cached
//! 002 (2025-03-07T08:05:00Z_sketch.md) → 2025-03-07T08:05:00Z_sketch/index.html
//!     Snippet: rendered
//!
//! Built 2 post(s), 1 index page(s) → output/
//! Cache: 1 cached, 1 rendered (2 total)
//!
//! output/
//! ├── 2025-03-07T08:05:00Z_sketch/
//! │   └── index.html
//! ├── 2026-02-05T21:38:22Z_arpeggiator/
//! │   └── index.html
//! └── index.html
//! ```
//!
//! ## Validate
//!
//! ```text
//! Invalid filename: bad-name.md
//!   - Filename must match YYYY-MM-DDThh:mm:ssZ_slug.md (e.g. ...)
//! Invalid content in: 2026-01-01T00:00:00Z_broken.md
//!   - front matter: draft: invalid type ...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to the terminal. Format
//! functions are pure; the only I/O here is [`collect_tree`], which reads
//! the output directory into plain data for [`format_tree`].

use crate::generate::BuildResult;
use crate::naming;
use crate::types::{RenderedPost, SnippetStatus};
use crate::validate::{IssueKind, ValidationReport};
use std::cmp::Ordering;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a post line: titled posts show the title, untitled ones show the
/// filename in parens.
///
/// ```text
/// 001 Arpeggiator
/// 002 (2025-03-07T08:05:00Z_sketch.md)
/// ```
fn post_line(index: usize, title: &str, filename: &str) -> String {
    if title.is_empty() {
        format!("{} ({})", format_index(index), filename)
    } else {
        format!("{} {}", format_index(index), title)
    }
}

fn status_label(status: SnippetStatus) -> &'static str {
    match status {
        SnippetStatus::Cached => "cached",
        SnippetStatus::Rendered => "rendered",
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Lines for one post: header with output page, then context.
fn format_post(index: usize, post: &RenderedPost) -> Vec<String> {
    let page = format!("{}/index.html", naming::post_stem(&post.filename));
    let mut lines = vec![format!(
        "{} → {}",
        post_line(index, &post.title, &post.filename),
        page
    )];
    if !post.title.is_empty() {
        lines.push(format!("{}Source: {}", indent(1), post.filename));
    }
    lines.push(format!(
        "{}Snippet: {}",
        indent(1),
        status_label(post.status)
    ));
    lines
}

/// Format the build report: posts, summary, and cache statistics.
pub fn format_build_output(result: &BuildResult) -> Vec<String> {
    let mut lines = Vec::new();

    if !result.posts.is_empty() {
        lines.push("Posts".to_string());
        for (i, post) in result.posts.iter().enumerate() {
            lines.extend(format_post(i + 1, post));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "Built {} post(s), {} index page(s) → {}/",
        result.posts.len(),
        result.pages,
        dir_name(&result.output_dir)
    ));
    if result.images > 0 {
        lines.push(format!("Copied {} image(s)", result.images));
    }
    lines.push(format!("Cache: {}", result.cache_stats));
    lines
}

/// Print the build report followed by the output tree.
pub fn print_build_output(result: &BuildResult) -> io::Result<()> {
    for line in format_build_output(result) {
        println!("{}", line);
    }
    println!();
    let entries = collect_tree(&result.output_dir)?;
    for line in format_tree(&dir_name(&result.output_dir), &entries) {
        println!("{}", line);
    }
    Ok(())
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

// ============================================================================
// Output tree
// ============================================================================

/// One entry below the listed root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// 1 for direct children of the root.
    pub depth: usize,
    pub name: String,
    pub is_dir: bool,
}

/// Walk `dir` depth-first: at each level directories come before files and
/// each group is sorted by name.
pub fn collect_tree(dir: &Path) -> io::Result<Vec<TreeEntry>> {
    let walker = WalkDir::new(dir).min_depth(1).sort_by(|a, b| {
        match (a.file_type().is_dir(), b.file_type().is_dir()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.file_name().cmp(b.file_name()),
        }
    });
    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry?;
        entries.push(TreeEntry {
            depth: entry.depth(),
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: entry.file_type().is_dir(),
        });
    }
    Ok(entries)
}

/// Draw a walked tree with `├──`/`└──` connectors under a `root/` line.
/// Directories get a trailing `/`.
pub fn format_tree(root: &str, entries: &[TreeEntry]) -> Vec<String> {
    let mut lines = vec![format!("{}/", root)];
    // last-sibling flag of each open ancestor
    let mut open: Vec<bool> = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        open.truncate(entry.depth.saturating_sub(1));
        let is_last = !entries[i + 1..]
            .iter()
            .take_while(|e| e.depth >= entry.depth)
            .any(|e| e.depth == entry.depth);

        let mut line: String = open
            .iter()
            .map(|&last| if last { "    " } else { "│   " })
            .collect();
        line.push_str(if is_last { "└── " } else { "├── " });
        line.push_str(&entry.name);
        if entry.is_dir {
            line.push('/');
        }
        lines.push(line);
        open.push(is_last);
    }
    lines
}

// ============================================================================
// Validate output
// ============================================================================

/// Format a validation report: one block per failed check, or a success
/// line when nothing failed.
pub fn format_validation_report(report: &ValidationReport) -> Vec<String> {
    if report.is_ok() {
        return vec![format!(
            "Validated {} file(s) successfully.",
            report.files_checked
        )];
    }
    let mut lines = Vec::new();
    for issue in &report.issues {
        let header = match issue.kind {
            IssueKind::Filename => "Invalid filename",
            IssueKind::Content => "Invalid content in",
        };
        lines.push(format!("{}: {}", header, issue.filename));
        lines.push(format!("  - {}", issue.message));
    }
    lines
}

/// Print a validation report: issues to stderr, success to stdout.
pub fn print_validation_report(report: &ValidationReport) {
    let lines = format_validation_report(report);
    if report.is_ok() {
        for line in lines {
            println!("{}", line);
        }
    } else {
        for line in lines {
            eprintln!("{}", line);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
