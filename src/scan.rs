//! Post discovery.
//!
//! Stage 1 of the build. Reads every `.md` file in the input directory,
//! strips and parses its front matter, drops drafts, and returns the
//! remaining posts newest first.
//!
//! ## Ordering
//!
//! Filenames start with a fixed-width UTC timestamp, so sorting them as
//! strings sorts them chronologically. Files are sorted ascending and then
//! reversed; that order is never changed by any later stage.
//!
//! ## Drafts
//!
//! A post with `draft: true` in its front matter is dropped here, before
//! anything is rendered or cached, so it cannot appear in any output page or
//! in the post count.

use crate::dates;
use crate::frontmatter::{self, FrontMatterError};
use crate::naming;
use crate::types::Post;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Reading input directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Reading post {path}: {source}")]
    ReadPost {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid front matter in {filename}: {source}")]
    FrontMatter {
        filename: String,
        source: FrontMatterError,
    },
}

/// Names of the `.md` files directly inside `input_dir`, newest first.
pub fn list_post_files(input_dir: &Path) -> Result<Vec<String>, ScanError> {
    let read_dir_err = |source| ScanError::ReadDir {
        path: input_dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if naming::is_post_file(&name) && entry.path().is_file() {
            names.push(name);
        }
    }
    names.sort();
    names.reverse();
    Ok(names)
}

/// Read all published posts from `input_dir`, newest first.
pub fn scan(input_dir: &Path) -> Result<Vec<Post>, ScanError> {
    let mut posts = Vec::new();
    for filename in list_post_files(input_dir)? {
        let path = input_dir.join(&filename);
        let raw = fs::read_to_string(&path).map_err(|source| ScanError::ReadPost {
            path: path.clone(),
            source,
        })?;
        match parse_post(filename, raw)? {
            Some(post) => posts.push(post),
            None => debug!(path = %path.display(), "skipping draft"),
        }
    }
    Ok(posts)
}

/// Build a [`Post`] from a filename and its raw text. Returns `None` for
/// drafts.
pub fn parse_post(filename: String, raw: String) -> Result<Option<Post>, ScanError> {
    let doc = frontmatter::parse(&raw).map_err(|source| ScanError::FrontMatter {
        filename: filename.clone(),
        source,
    })?;
    if doc.front_matter.is_draft() {
        return Ok(None);
    }
    let title = doc.front_matter.title.unwrap_or_default();
    let content = doc.body.to_string();
    Ok(Some(Post {
        datetime_iso: dates::datetime_iso(&filename).to_string(),
        datetime_readable: dates::readable_from_filename(&filename),
        title,
        content,
        filename,
        raw,
    }))
}
