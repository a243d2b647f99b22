//! Rendered snippet cache.
//!
//! Rendering a post means running markdown through the parser and every
//! fenced code block through the syntax highlighter, then filling the post
//! template. This module lets the build skip all of that for posts whose
//! source and template haven't changed since the last build.
//!
//! # Design
//!
//! ## Cache keys
//!
//! Entries are keyed by post filename: one JSON file per post at
//! `<cache_dir>/<filename>.json`:
//!
//! ```json
//! {"hash":"3f1c…","html":"<article>…</article>"}
//! ```
//!
//! The `hash` is SHA-256 over the raw post file followed by the raw post
//! template source ([`snippet_hash`]). An entry is a hit only when the
//! stored hash equals the hash recomputed from the current post and current
//! template, so editing either re-renders the post. The outline template is
//! not part of the hash; snippets never contain page chrome.
//!
//! ## Failure handling
//!
//! Reads never fail. A missing file, unreadable file, malformed JSON, or a
//! record with the wrong shape is a miss, and the post is simply rendered
//! again and the entry overwritten. Writes do fail: an unwritable cache
//! directory is an I/O error like any other.
//!
//! ## Lifecycle
//!
//! There is no eviction. Entries for deleted posts stay on disk until the
//! cache directory is removed by hand; they are never read.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One cached snippet as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub hash: String,
    pub html: String,
}

/// Directory-backed snippet cache.
#[derive(Debug, Clone)]
pub struct SnippetCache {
    dir: PathBuf,
}

impl SnippetCache {
    /// Open the cache at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Location of the entry for a post.
    pub fn entry_path(&self, filename: &str) -> PathBuf {
        self.dir.join(format!("{filename}.json"))
    }

    /// Return the cached HTML for `filename` if its stored hash is `hash`.
    pub fn get(&self, filename: &str, hash: &str) -> Option<String> {
        let path = self.entry_path(filename);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                debug!(post = filename, error = %e, "cache entry unreadable");
                return None;
            }
        };
        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(post = filename, error = %e, "cache entry corrupt");
                return None;
            }
        };
        if entry.hash == hash {
            Some(entry.html)
        } else {
            debug!(post = filename, "cache entry stale");
            None
        }
    }

    /// Store `html` for `filename` under `hash`, replacing any existing entry.
    ///
    /// The record is written to a temporary file in the cache directory and
    /// renamed into place, so readers never see a half-written entry.
    pub fn put(&self, filename: &str, hash: &str, html: &str) -> io::Result<()> {
        let entry = CacheEntry {
            hash: hash.to_string(),
            html: html.to_string(),
        };
        let json = serde_json::to_string(&entry)?;
        let path = self.entry_path(filename);
        let tmp = self.dir.join(format!(".{filename}.json.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)
    }
}

/// SHA-256 of the raw post followed by the raw post template, as hex.
pub fn snippet_hash(raw_post: &str, template_source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_post.as_bytes());
    hasher.update(template_source.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Summary of cache performance for a build run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} rendered ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} rendered", self.misses)
        }
    }
}
