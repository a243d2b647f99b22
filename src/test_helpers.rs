//! Shared test utilities for the static-attic test suite.
//!
//! Provides a throwaway project built from `fixtures/`, plus writers and
//! readers for the files a build consumes and produces.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let result = build_fixtures(tmp.path());
//!
//! assert_eq!(post_titles(&result)[0], "Arpeggiator");
//! let index = read_output(tmp.path(), "index.html");
//! assert!(index.contains("/page/2/"));
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::{SiteConfig, SitePaths};
use crate::generate::{self, BuildResult};

/// Published fixture posts, newest first.
pub const FIXTURE_POSTS: [&str; 7] = [
    "2026-02-05T21:38:22Z_arpeggiator.md",
    "2026-01-10T07:00:00Z_field-notes.md",
    "2025-12-31T23:59:59Z_year-end.md",
    "2025-09-20T18:45:10Z_code.md",
    "2025-03-07T08:05:00Z_sketch.md",
    "2024-06-15T10:30:00Z_tables.md",
    "2024-01-01T00:00:00Z_first-post.md",
];

/// The fixture post marked `draft: true`.
pub const FIXTURE_DRAFT: &str = "2026-02-07T09:00:00Z_untitled.md";

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/` (input and templates) to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Default paths for a project rooted at `root`.
pub fn paths(root: &Path) -> SitePaths {
    SitePaths::resolve(root, &SiteConfig::default().paths)
}

/// Build the project at `root` with default config and the cache enabled.
pub fn build_fixtures(root: &Path) -> BuildResult {
    generate::build(&paths(root), &SiteConfig::default(), true).unwrap()
}

// =========================================================================
// Writers and readers
// =========================================================================

/// Write (or overwrite) a post in the project's input directory.
pub fn write_post(root: &Path, filename: &str, content: &str) {
    fs::write(root.join("input").join(filename), content).unwrap();
}

/// Read a generated file by its path relative to the output directory.
/// Panics with the missing path on failure.
pub fn read_output(root: &Path, rel: &str) -> String {
    let path = root.join("output").join(rel);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("output file '{}' unreadable: {e}", path.display()))
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Post filenames in build order.
pub fn post_filenames(result: &BuildResult) -> Vec<&str> {
    result.posts.iter().map(|p| p.filename.as_str()).collect()
}

/// Post titles in build order.
pub fn post_titles(result: &BuildResult) -> Vec<&str> {
    result.posts.iter().map(|p| p.title.as_str()).collect()
}
