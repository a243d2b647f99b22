//! New post scaffolding.
//!
//! Creates an empty draft post named after the current UTC time:
//!
//! ```text
//! input/2026-02-05T21:38:22Z_my-new-post.md
//! ---
//! draft: true
//! ---
//!
//! ```
//!
//! The slug is checked and the target path is checked before anything is
//! written, so a rejected request leaves the input directory untouched.

use crate::naming;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Initial contents of a scaffolded post.
pub const DRAFT_TEMPLATE: &str = "---\ndraft: true\n---\n\n";

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error(
        "Invalid slug: \"{0}\". Use lowercase letters, numbers, and hyphens (e.g. \"my-new-post\")."
    )]
    InvalidSlug(String),
    #[error("File already exists: {0}")]
    AlreadyExists(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create a draft post for `slug` stamped with `now`, returning its path.
pub fn create_post(
    input_dir: &Path,
    slug: &str,
    now: DateTime<Utc>,
) -> Result<PathBuf, ScaffoldError> {
    if !naming::is_valid_slug(slug) {
        return Err(ScaffoldError::InvalidSlug(slug.to_string()));
    }
    let filename = naming::post_filename(now, slug);
    let path = input_dir.join(&filename);
    if path.exists() {
        return Err(ScaffoldError::AlreadyExists(filename));
    }

    fs::create_dir_all(input_dir)?;
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
    {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(ScaffoldError::AlreadyExists(filename));
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(DRAFT_TEMPLATE.as_bytes())?;
    Ok(path)
}
