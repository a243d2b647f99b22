//! # static-attic
//!
//! A small static site generator for dated markdown posts. Each post is one
//! file whose name carries its publication time; the generator renders every
//! post to an HTML snippet, wraps snippets in page templates, and writes a
//! paginated, navigable site.
//!
//! # Architecture: Two-Stage Build
//!
//! ```text
//! 1. Scan      input/  →  Vec<Post>   (files → parsed posts, drafts dropped)
//! 2. Generate  posts   →  output/     (snippets, permalink pages, index pages)
//! ```
//!
//! Between the two, every post's snippet is looked up in a content-hash
//! cache. The key covers the raw post file and the post template, so a
//! rebuild only renders posts that actually changed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: lists posts newest first, parses front matter, drops drafts |
//! | [`generate`] | Stage 2: resolves snippets, writes permalink and index pages, copies images |
//! | [`cache`] | Snippet cache: one `{hash, html}` JSON file per post |
//! | [`markdown`] | Markdown to HTML with syntax-highlighted code blocks |
//! | [`templates`] | `post.html` and `outline.html`, rendered with named placeholders |
//! | [`frontmatter`] | YAML front matter splitting and schema |
//! | [`dates`] | Filename timestamp decoding and display formatting |
//! | [`naming`] | `YYYY-MM-DDThh:mm:ssZ_slug.md` convention, slugs, permalinks |
//! | [`validate`] | Report-all checks of filenames and front matter |
//! | [`scaffold`] | Creates new draft posts |
//! | [`config`] | `config.toml` loading, merging over defaults, validation |
//! | [`types`] | Shared types (`Post`, `RenderedPost`) |
//! | [`output`] | CLI output formatting: post listing, output tree, validation report |
//!
//! # Design Decisions
//!
//! ## The Filename Is the Database
//!
//! A post's timestamp lives in its filename, never in front matter. Sorting
//! filenames as strings therefore sorts posts by time, permalinks are stable
//! as long as the file is not renamed, and two posts can never collide.
//! The `date` front matter key is accepted but ignored.
//!
//! ## Templates Are Data
//!
//! Page markup lives in two plain HTML files next to the content instead of
//! in the binary. Changing the post template changes every cache key, so
//! template edits re-render everything on the next build without any manual
//! cache clearing.
//!
//! ## Full Rebuilds, Cached Snippets
//!
//! The output directory is wiped on every build; only snippet HTML is
//! reused. Index pages and permalink pages are cheap string concatenation
//! and are always regenerated, which keeps navigation correct when posts are
//! added or removed.

pub mod cache;
pub mod config;
pub mod dates;
pub mod frontmatter;
pub mod generate;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod scaffold;
pub mod scan;
pub mod templates;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
