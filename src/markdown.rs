//! Markdown to HTML conversion.
//!
//! Post bodies go through [pulldown-cmark](https://docs.rs/pulldown-cmark)
//! with tables, footnotes, strikethrough, and task lists enabled. Raw HTML in
//! the markdown is passed through untouched; post content is trusted.
//!
//! Code blocks are intercepted from the event stream and replaced with
//! [syntect](https://docs.rs/syntect) output that carries scope classes
//! (`hl-keyword`, `hl-string`, ...) instead of colors. Colors come from one
//! stylesheet built by [`highlight_stylesheet`]: a light theme, and a dark
//! theme under `prefers-color-scheme: dark`. Snippet HTML is therefore the
//! same whatever themes are configured.
//!
//! The fence info string's first word picks the syntax (` ```rust `); unknown
//! languages and indented blocks are rendered as plain text in the same
//! `<pre class="hl-code">`.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use thiserror::Error;

/// Prefix on every class syntect emits, so highlight classes never clash with
/// the site's own CSS.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// File name of the highlight stylesheet in the output root.
pub const STYLESHEET_FILENAME: &str = "highlight.css";

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("Unknown highlight theme '{name}'. Available: {available}")]
    UnknownTheme { name: String, available: String },
    #[error("Highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),
}

/// Renders markdown bodies to HTML. Build once per run; loading the syntax
/// definitions is the expensive part.
pub struct MarkdownRenderer {
    syntaxes: SyntaxSet,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Convert a markdown body to an HTML fragment.
    pub fn render(&self, markdown: &str) -> Result<String, MarkdownError> {
        let mut events = Vec::new();
        // (language, accumulated source) while inside a code block
        let mut code: Option<(Option<String>, String)> = None;

        for event in Parser::new_ext(markdown, options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::Text(text) if code.is_some() => {
                    if let Some((_, source)) = code.as_mut() {
                        source.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, source)) = code.take() {
                        let highlighted = self.highlight(lang.as_deref(), &source)?;
                        events.push(Event::Html(highlighted.into()));
                    }
                }
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        Ok(out)
    }

    fn highlight(&self, lang: Option<&str>, source: &str) -> Result<String, MarkdownError> {
        let syntax = lang
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, CLASS_STYLE);
        for line in LinesWithEndings::from(source) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(format!(
            "<pre class=\"hl-code\"><code>{}</code></pre>\n",
            generator.finalize()
        ))
    }
}

/// CSS for the classes emitted by [`MarkdownRenderer`]: `light` applies by
/// default, `dark` when the reader's system prefers a dark color scheme.
/// Both name one of syntect's bundled themes.
pub fn highlight_stylesheet(light: &str, dark: &str) -> Result<String, MarkdownError> {
    let themes = ThemeSet::load_defaults();
    let light_css = css_for_theme_with_class_style(bundled_theme(&themes, light)?, CLASS_STYLE)?;
    let dark_css = css_for_theme_with_class_style(bundled_theme(&themes, dark)?, CLASS_STYLE)?;
    Ok(format!(
        "{light_css}\n@media (prefers-color-scheme: dark) {{\n{dark_css}}}\n"
    ))
}

fn bundled_theme<'a>(themes: &'a ThemeSet, name: &str) -> Result<&'a Theme, MarkdownError> {
    themes.themes.get(name).ok_or_else(|| {
        let available: Vec<&str> = themes.themes.keys().map(String::as_str).collect();
        MarkdownError::UnknownTheme {
            name: name.to_string(),
            available: available.join(", "),
        }
    })
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}
