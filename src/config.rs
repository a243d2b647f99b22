//! Site configuration module.
//!
//! Handles loading, validating, and merging the project's `config.toml`.
//! Stock defaults are serialized to a TOML table and the user's file is
//! merged on top, so a config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! `config.toml` lives in the project root (the `--root` CLI flag, `.` by
//! default). All directory paths inside it are relative to that root:
//!
//! ```text
//! blog/
//! ├── config.toml          # optional
//! ├── input/               # posts and images/
//! ├── templates/           # post.html, outline.html
//! ├── cache/               # snippet cache (created on build)
//! └── output/              # generated site (recreated on build)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_name = "static-attic"                  # Page title fallback
//! posts_per_page = 5                          # Posts per index page
//! highlight_theme = "InspiredGitHub"          # Code colors, light scheme
//! highlight_theme_dark = "base16-ocean.dark"  # Code colors, dark scheme
//!
//! [paths]
//! input = "input"
//! output = "output"
//! cache = "cache"
//! templates = "templates"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside the project root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Title used for index pages and for posts without a title.
    pub site_name: String,
    /// Number of posts on each index page.
    pub posts_per_page: usize,
    /// Bundled syntax highlighting theme for light color schemes.
    pub highlight_theme: String,
    /// Bundled syntax highlighting theme for `prefers-color-scheme: dark`.
    pub highlight_theme_dark: String,
    /// Directory layout, relative to the project root.
    pub paths: PathsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "static-attic".to_string(),
            posts_per_page: 5,
            highlight_theme: "InspiredGitHub".to_string(),
            highlight_theme_dark: "base16-ocean.dark".to_string(),
            paths: PathsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.posts_per_page == 0 {
            return Err(ConfigError::Validation(
                "posts_per_page must be at least 1".into(),
            ));
        }
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Project directory layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Markdown posts, plus an optional flat `images/` directory.
    pub input: PathBuf,
    /// Generated site. Deleted and recreated on every build.
    pub output: PathBuf,
    /// Snippet cache, one JSON file per post.
    pub cache: PathBuf,
    /// Holds `post.html` and `outline.html`.
    pub templates: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input"),
            output: PathBuf::from("output"),
            cache: PathBuf::from("cache"),
            templates: PathBuf::from("templates"),
        }
    }
}

/// Concrete directories for one build, with the project root applied.
///
/// The orchestrator only ever sees these; nothing derives paths from the
/// executable's location.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePaths {
    pub root: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub cache: PathBuf,
    pub templates: PathBuf,
}

impl SitePaths {
    /// Resolve configured paths against `root`. Absolute paths are kept.
    pub fn resolve(root: &Path, paths: &PathsConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            input: root.join(&paths.input),
            output: root.join(&paths.output),
            cache: root.join(&paths.cache),
            templates: root.join(&paths.templates),
        }
    }

    /// Reject an output directory whose wipe would take user data with it.
    ///
    /// The output may not be the project root or one of its ancestors, and
    /// may not be, or contain, the input, templates, or cache directory.
    /// Paths are compared after making them absolute and folding `.` and
    /// `..`; symlinks are not followed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let output = normalize(&self.output)?;
        if normalize(&self.root)?.starts_with(&output) {
            return Err(ConfigError::Validation(format!(
                "paths.output {} must not be the project root or contain it \
                 (output is deleted on every build)",
                self.output.display()
            )));
        }
        for (key, dir) in [
            ("input", &self.input),
            ("templates", &self.templates),
            ("cache", &self.cache),
        ] {
            if normalize(dir)?.starts_with(&output) {
                return Err(ConfigError::Validation(format!(
                    "paths.output {} must not be or contain paths.{key} {} \
                     (output is deleted on every build)",
                    self.output.display(),
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// The `images/` directory inside the input directory.
    pub fn images_input(&self) -> PathBuf {
        self.input.join("images")
    }
}

/// Absolute form of `path` with `.` dropped and `..` applied lexically.
fn normalize(path: &Path) -> Result<PathBuf, ConfigError> {
    let mut out = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the project root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result, including the directory layout under `root`.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    SitePaths::resolve(root, &config.paths).validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# static-attic configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Title of index pages, and of post pages whose front matter has no title.
site_name = "static-attic"

# Number of posts on each index page. Page 1 is written to index.html,
# page N to page/N/index.html.
posts_per_page = 5

# Color themes for fenced code blocks, written to highlight.css in the
# output. The dark theme applies when the reader's system prefers a dark
# color scheme. Bundled themes:
#   InspiredGitHub, Solarized (light), Solarized (dark),
#   base16-ocean.dark, base16-ocean.light, base16-eighties.dark,
#   base16-mocha.dark
highlight_theme = "InspiredGitHub"
highlight_theme_dark = "base16-ocean.dark"

# ---------------------------------------------------------------------------
# Directories, relative to the project root
# ---------------------------------------------------------------------------
[paths]
# Markdown posts named YYYY-MM-DDThh:mm:ssZ_slug.md, plus optional images/.
input = "input"

# Generated site. Deleted and recreated on every build.
output = "output"

# Rendered snippet cache. Safe to delete at any time.
cache = "cache"

# post.html and outline.html.
templates = "templates"
"##
}
