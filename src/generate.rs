//! HTML site generation.
//!
//! Stage 2 of the build. Takes the scanned posts, resolves each post's
//! snippet HTML through the [cache](crate::cache), and writes the final
//! static site.
//!
//! ## Generated Pages
//!
//! - **Permalink pages** (`/{stem}/index.html`): one post in the outline,
//!   linked to the next newer and next older post
//! - **Index pages** (`/index.html`, `/page/{n}/index.html`): posts newest
//!   first, `posts_per_page` to a page
//! - **Images** (`/images/*`): copied from `input/images/`, flat
//! - **Highlight stylesheet** (`/highlight.css`): light and dark code colors
//!
//! ## Output Structure
//!
//! ```text
//! output/
//! ├── index.html                          # Posts 1-5
//! ├── highlight.css
//! ├── page/
//! │   └── 2/
//! │       └── index.html                  # Posts 6-10
//! ├── 2026-02-05T21:38:22Z_arpeggiator/
//! │   └── index.html                      # Permalink page
//! └── images/
//!     └── synth.jpg
//! ```
//!
//! The output directory is deleted and recreated on every build, so files
//! that no longer correspond to a post never linger. The directory layout and
//! highlight themes are checked first; a build that fails those checks
//! leaves the filesystem untouched.
//!
//! ## Navigation
//!
//! Every page gets a `prev` and a `next` URL, empty when there is no such
//! page. On permalink pages `prev` is the newer post and `next` the older
//! one. On index pages `prev` points toward page 1 (`/`) and `next` toward
//! the last page.

use crate::cache::{CacheStats, SnippetCache, snippet_hash};
use crate::config::{ConfigError, SiteConfig, SitePaths};
use crate::markdown::{self, MarkdownError, MarkdownRenderer};
use crate::naming;
use crate::scan::{self, ScanError};
use crate::templates::{OutlineContext, PostContext, TemplateError, Templates};
use crate::types::{Post, RenderedPost, SnippetStatus};
use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("Markdown error: {0}")]
    Markdown(#[from] MarkdownError),
}

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildResult {
    /// Published posts, newest first, with how their snippet was obtained.
    pub posts: Vec<RenderedPost>,
    /// Number of index pages written (at least 1).
    pub pages: usize,
    /// Number of files copied from `input/images/`.
    pub images: usize,
    pub cache_stats: CacheStats,
    pub output_dir: PathBuf,
}

/// One index page: which posts it holds and where it links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPage {
    /// 1-based page number.
    pub number: usize,
    /// Indices into the newest-first post list.
    pub posts: Range<usize>,
    pub prev: String,
    pub next: String,
}

impl IndexPage {
    /// Output file for this page, relative to the output directory.
    pub fn output_path(&self) -> PathBuf {
        if self.number == 1 {
            PathBuf::from("index.html")
        } else {
            Path::new("page")
                .join(self.number.to_string())
                .join("index.html")
        }
    }
}

/// URL of index page `n` (1-based). Page 1 is the site root.
pub fn page_url(n: usize) -> String {
    if n <= 1 {
        "/".to_string()
    } else {
        format!("/page/{n}/")
    }
}

/// Split `post_count` posts into index pages of `per_page`.
///
/// Always returns at least one page, so an empty site still has an
/// `index.html`. The last page holds the remainder.
pub fn paginate(post_count: usize, per_page: usize) -> Vec<IndexPage> {
    let per_page = per_page.max(1);
    let page_count = post_count.div_ceil(per_page).max(1);
    (1..=page_count)
        .map(|number| {
            let start = (number - 1) * per_page;
            let end = (start + per_page).min(post_count);
            IndexPage {
                number,
                posts: start..end,
                prev: if number > 1 {
                    page_url(number - 1)
                } else {
                    String::new()
                },
                next: if number < page_count {
                    page_url(number + 1)
                } else {
                    String::new()
                },
            }
        })
        .collect()
}

/// `(prev, next)` links for the permalink page at `index` in a newest-first
/// list of `permalinks`: prev is the newer post, next the older one.
pub fn permalink_nav(permalinks: &[String], index: usize) -> (String, String) {
    let prev = index
        .checked_sub(1)
        .and_then(|i| permalinks.get(i))
        .cloned()
        .unwrap_or_default();
    let next = permalinks.get(index + 1).cloned().unwrap_or_default();
    (prev, next)
}

/// Run the full build: scan, render, paginate, copy images.
///
/// With `use_cache` false every snippet is rendered, but the results are
/// still written to the cache for the next build.
pub fn build(
    paths: &SitePaths,
    config: &SiteConfig,
    use_cache: bool,
) -> Result<BuildResult, GenerateError> {
    paths.validate()?;
    let stylesheet =
        markdown::highlight_stylesheet(&config.highlight_theme, &config.highlight_theme_dark)?;

    reset_dir(&paths.output)?;
    let cache = SnippetCache::open(&paths.cache)?;

    let posts = scan::scan(&paths.input)?;
    info!(count = posts.len(), input = %paths.input.display(), "scanned posts");

    let templates = Templates::load(&paths.templates)?;
    let renderer = MarkdownRenderer::new();

    let mut stats = CacheStats::default();
    let mut snippets = Vec::with_capacity(posts.len());
    let mut rendered = Vec::with_capacity(posts.len());
    for post in &posts {
        let (html, status) =
            resolve_snippet(post, &templates, &renderer, &cache, use_cache, &mut stats)?;
        snippets.push(html);
        rendered.push(RenderedPost {
            filename: post.filename.clone(),
            title: post.title.clone(),
            permalink: naming::permalink(&post.filename),
            status,
        });
    }
    info!(%stats, "resolved snippets");

    let permalinks: Vec<String> = rendered.iter().map(|p| p.permalink.clone()).collect();
    for (i, post) in posts.iter().enumerate() {
        let (prev, next) = permalink_nav(&permalinks, i);
        let title = if post.title.is_empty() {
            config.site_name.as_str()
        } else {
            post.title.as_str()
        };
        let html = templates.render_outline(&OutlineContext {
            title,
            posts: &snippets[i],
            prev: &prev,
            next: &next,
        })?;
        let path = paths
            .output
            .join(naming::post_stem(&post.filename))
            .join("index.html");
        write_page(&path, &html)?;
    }

    let pages = paginate(posts.len(), config.posts_per_page);
    for page in &pages {
        let body = snippets[page.posts.clone()].join("\n");
        let html = templates.render_outline(&OutlineContext {
            title: &config.site_name,
            posts: &body,
            prev: &page.prev,
            next: &page.next,
        })?;
        write_page(&paths.output.join(page.output_path()), &html)?;
    }
    info!(pages = pages.len(), "wrote index pages");

    write_page(&paths.output.join(markdown::STYLESHEET_FILENAME), &stylesheet)?;
    let images = copy_images(&paths.images_input(), &paths.output.join("images"))?;

    Ok(BuildResult {
        posts: rendered,
        pages: pages.len(),
        images,
        cache_stats: stats,
        output_dir: paths.output.clone(),
    })
}

fn resolve_snippet(
    post: &Post,
    templates: &Templates,
    renderer: &MarkdownRenderer,
    cache: &SnippetCache,
    use_cache: bool,
    stats: &mut CacheStats,
) -> Result<(String, SnippetStatus), GenerateError> {
    let hash = snippet_hash(&post.raw, templates.post_source());

    if use_cache {
        if let Some(html) = cache.get(&post.filename, &hash) {
            debug!(post = %post.filename, "cache hit");
            stats.hit();
            return Ok((html, SnippetStatus::Cached));
        }
    }

    debug!(post = %post.filename, "rendering");
    let content = renderer.render(&post.content)?;
    let permalink = naming::permalink(&post.filename);
    let html = templates.render_post(&PostContext {
        permalink: &permalink,
        datetime_iso: &post.datetime_iso,
        datetime_readable: &post.datetime_readable,
        title: &post.title,
        content: &content,
    })?;
    cache.put(&post.filename, &hash, &html)?;
    stats.miss();
    Ok((html, SnippetStatus::Rendered))
}

/// Delete `dir` if it exists and create it empty.
fn reset_dir(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir_all(dir)
}

fn write_page(path: &Path, html: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    debug!(path = %path.display(), "wrote page");
    Ok(())
}

/// Copy the regular files directly inside `src` to `dst`. Subdirectories are
/// skipped. A missing `src` copies nothing.
fn copy_images(src: &Path, dst: &Path) -> io::Result<usize> {
    if !src.is_dir() {
        return Ok(0);
    }
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        if !src_path.is_file() {
            debug!(path = %src_path.display(), "skipping non-file in images");
            continue;
        }
        fs::copy(&src_path, dst.join(entry.file_name()))?;
        copied += 1;
    }
    Ok(copied)
}
