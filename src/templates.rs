//! The two page templates.
//!
//! Templates are plain HTML files with named placeholders, parsed once per
//! build by [minijinja](https://docs.rs/minijinja):
//!
//! | File | Placeholders | Produces |
//! |------|--------------|----------|
//! | `post.html` | `permalink`, `datetime_iso`, `datetime_readable`, `title`, `content` | one post snippet |
//! | `outline.html` | `title`, `posts`, `prev`, `next` | a full page around one or more snippets |
//!
//! ```html
//! <article>
//!   <h2><a href="{{ permalink }}">{{ title }}</a></h2>
//!   <time datetime="{{ datetime_iso }}">{{ datetime_readable }}</time>
//!   {{ content }}
//! </article>
//! ```
//!
//! Rendering is pure substitution: no escaping is applied, because every
//! value is either pre-rendered HTML or trusted front matter. Referencing a
//! placeholder that does not exist is an error rather than an empty string,
//! so a typo in a template fails the build instead of silently dropping
//! content.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filename of the post snippet template.
pub const POST_TEMPLATE: &str = "post.html";

/// Filename of the page outline template.
pub const OUTLINE_TEMPLATE: &str = "outline.html";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Reading template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Values available to `post.html`.
#[derive(Debug, Serialize)]
pub struct PostContext<'a> {
    pub permalink: &'a str,
    pub datetime_iso: &'a str,
    pub datetime_readable: &'a str,
    pub title: &'a str,
    pub content: &'a str,
}

/// Values available to `outline.html`.
#[derive(Debug, Serialize)]
pub struct OutlineContext<'a> {
    pub title: &'a str,
    pub posts: &'a str,
    pub prev: &'a str,
    pub next: &'a str,
}

/// Parsed post and outline templates.
pub struct Templates {
    env: Environment<'static>,
    post_source: String,
}

impl Templates {
    /// Read and parse `post.html` and `outline.html` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let post = read_template(&dir.join(POST_TEMPLATE))?;
        let outline = read_template(&dir.join(OUTLINE_TEMPLATE))?;
        Self::from_sources(post, outline)
    }

    /// Parse templates from in-memory sources.
    pub fn from_sources(post: String, outline: String) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_template_owned(POST_TEMPLATE, post.clone())?;
        env.add_template_owned(OUTLINE_TEMPLATE, outline)?;
        Ok(Self {
            env,
            post_source: post,
        })
    }

    /// Raw text of `post.html`, as hashed by the snippet cache.
    pub fn post_source(&self) -> &str {
        &self.post_source
    }

    pub fn render_post(&self, ctx: &PostContext<'_>) -> Result<String, TemplateError> {
        Ok(self.env.get_template(POST_TEMPLATE)?.render(ctx)?)
    }

    pub fn render_outline(&self, ctx: &OutlineContext<'_>) -> Result<String, TemplateError> {
        Ok(self.env.get_template(OUTLINE_TEMPLATE)?.render(ctx)?)
    }
}

fn read_template(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })
}
