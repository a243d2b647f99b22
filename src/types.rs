//! Types shared between scanning, generation, and CLI output.

/// A published (non-draft) post, read once per build and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Source filename, e.g. `2026-02-05T21:38:22Z_arpeggiator.md`. Unique.
    pub filename: String,
    /// Timestamp prefix of the filename, verbatim.
    pub datetime_iso: String,
    /// Display form of the timestamp (`Thu 5 Feb 2026 21:38 UTC`).
    pub datetime_readable: String,
    /// Title from front matter; empty when absent.
    pub title: String,
    /// Markdown body with the front matter stripped.
    pub content: String,
    /// Unmodified file text. Hashed for the snippet cache.
    pub raw: String,
}

/// How a post's snippet HTML was obtained during a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetStatus {
    /// Served from the snippet cache.
    Cached,
    /// Rendered from markdown and written to the cache.
    Rendered,
}

/// A post after snippet resolution, in output order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPost {
    pub filename: String,
    pub title: String,
    pub permalink: String,
    pub status: SnippetStatus,
}
