//! YAML front matter at the top of a post.
//!
//! ```text
//! ---
//! title: Arpeggiator
//! draft: false
//! ---
//!
//! Body markdown starts here.
//! ```
//!
//! The block is optional. A file that does not open with a `---` line has no
//! front matter and its whole text is the body. The body is everything after
//! the closing `---` line, untouched. A leading byte order mark is skipped
//! and fence lines may end in whitespace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const FENCE: &str = "---";
const BOM: char = '\u{feff}';

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter opened with `---` but never closed")]
    Unterminated,
    #[error("front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Recognized front matter keys.
///
/// `date` and `mood` are reserved: they are accepted so existing posts
/// validate, but nothing in the build reads them. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
}

impl FrontMatter {
    pub fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }
}

/// A source file split into its front matter and markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    pub front_matter: FrontMatter,
    pub body: &'a str,
}

/// Split `raw` into the YAML block (if any) and the body.
pub fn split(raw: &str) -> Result<(Option<&str>, &str), FrontMatterError> {
    let raw = raw.strip_prefix(BOM).unwrap_or(raw);
    let Some(after_open) = strip_fence_line(raw) else {
        return Ok((None, raw));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

/// Parse a whole source file into a [`Document`].
pub fn parse(raw: &str) -> Result<Document<'_>, FrontMatterError> {
    let (yaml, body) = split(raw)?;
    let front_matter = match yaml {
        Some(yaml) => parse_yaml(yaml)?,
        None => FrontMatter::default(),
    };
    Ok(Document { front_matter, body })
}

fn parse_yaml(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    if value.is_null() {
        return Ok(FrontMatter::default());
    }
    Ok(serde_yaml::from_value(value)?)
}

/// Returns the text after an opening `---` line, or `None` if `raw` does not
/// start with one.
/// Trailing whitespace after the dashes is allowed.
fn strip_fence_line(raw: &str) -> Option<&str> {
    let (first, rest) = raw.split_once('\n')?;
    (first.trim_end() == FENCE).then_some(rest)
}
