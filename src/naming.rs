//! Post filename convention.
//!
//! Every post is named `YYYY-MM-DDThh:mm:ssZ_<slug>.md`. The timestamp
//! prefix makes filenames sort chronologically as plain strings, which is the
//! only ordering the build relies on. The slug is lowercase alphanumeric
//! segments joined by single hyphens.
//!
//! - `2026-02-05T21:38:22Z_arpeggiator.md` → valid
//! - `2024-01-01T00:00:00Z_my-first-post.md` → valid
//! - `bad-name.md` → no timestamp
//! - `2026-02-05_no-time.md` → timestamp without a time part

use crate::dates;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Extension recognized as post content.
pub const POST_EXTENSION: &str = ".md";

/// Slug used by `new` when none is given.
pub const DEFAULT_SLUG: &str = "untitled";

/// Full filename pattern for posts.
pub const FILENAME_PATTERN: &str =
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z_[a-z0-9]+(?:-[a-z0-9]+)*\.md$";

/// Slug pattern accepted by `new`.
pub const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";

/// Shown to users alongside a rejected filename.
pub const FILENAME_HINT: &str =
    "Filename must match YYYY-MM-DDThh:mm:ssZ_slug.md (e.g. 2026-02-05T21:38:22Z_arpeggiator.md)";

static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FILENAME_PATTERN).expect("filename pattern compiles"));

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SLUG_PATTERN).expect("slug pattern compiles"));

/// Whether `filename` follows the post naming convention.
pub fn is_valid_post_filename(filename: &str) -> bool {
    FILENAME_RE.is_match(filename)
}

/// Whether `slug` is lowercase alphanumeric segments joined by hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Whether a directory entry name is a post source file.
pub fn is_post_file(filename: &str) -> bool {
    filename.ends_with(POST_EXTENSION)
}

/// Filename with the `.md` extension removed.
///
/// This is the post's permalink path segment and output directory name.
pub fn post_stem(filename: &str) -> &str {
    filename.strip_suffix(POST_EXTENSION).unwrap_or(filename)
}

/// Site-relative permalink for a post: `/<stem>/`.
pub fn permalink(filename: &str) -> String {
    format!("/{}/", post_stem(filename))
}

/// Build a post filename from a timestamp and a slug.
pub fn post_filename(timestamp: DateTime<Utc>, slug: &str) -> String {
    format!(
        "{}_{}{}",
        dates::to_timestamp(timestamp),
        slug,
        POST_EXTENSION
    )
}
