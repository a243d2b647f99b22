//! End-to-end builds through the public library API.
//!
//! Each test lays out a small project in a temp directory, runs
//! [`generate::build`], and inspects the output tree and the snippet cache.

use pretty_assertions::assert_eq;
use static_attic::cache::{CacheStats, snippet_hash};
use static_attic::config::{self, SiteConfig, SitePaths};
use static_attic::generate::{self, BuildResult};
use static_attic::types::SnippetStatus;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const POST_TEMPLATE: &str =
    r#"<article><h2><a href="{{ permalink }}">{{ title }}</a></h2><time datetime="{{ datetime_iso }}">{{ datetime_readable }}</time>{{ content }}</article>"#;

const OUTLINE_TEMPLATE: &str = "<title>{{ title }}</title>\n<main>\n{{ posts }}\n</main>\n<nav prev=\"{{ prev }}\" next=\"{{ next }}\"></nav>\n";

struct Project {
    tmp: TempDir,
}

impl Project {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("input")).unwrap();
        fs::create_dir_all(tmp.path().join("templates")).unwrap();
        fs::write(tmp.path().join("templates/post.html"), POST_TEMPLATE).unwrap();
        fs::write(tmp.path().join("templates/outline.html"), OUTLINE_TEMPLATE).unwrap();
        Self { tmp }
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn post(&self, filename: &str, content: &str) -> &Self {
        fs::write(self.root().join("input").join(filename), content).unwrap();
        self
    }

    /// Add `n` titled posts, one per day in January 2026.
    fn posts(&self, n: usize) -> &Self {
        for day in 1..=n {
            self.post(
                &format!("2026-01-{day:02}T12:00:00Z_day-{day}.md"),
                &format!("---\ntitle: Day {day}\n---\nEntry {day}.\n"),
            );
        }
        self
    }

    fn build_with(&self, use_cache: bool) -> BuildResult {
        let config = config::load_config(self.root()).unwrap();
        let paths = SitePaths::resolve(self.root(), &config.paths);
        generate::build(&paths, &config, use_cache).unwrap()
    }

    fn build(&self) -> BuildResult {
        self.build_with(true)
    }

    fn output(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join("output").join(rel)).unwrap()
    }

    fn cache_entry(&self, filename: &str) -> serde_json::Value {
        let raw = fs::read_to_string(self.root().join("cache").join(format!("{filename}.json")))
            .unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

fn statuses(result: &BuildResult) -> Vec<SnippetStatus> {
    result.posts.iter().map(|p| p.status).collect()
}

/// Titles in the order their `<h2>` appears on a page.
fn titles_on(page: &str) -> Vec<String> {
    page.split("\">")
        .skip(1)
        .filter_map(|s| s.split_once("</a></h2>"))
        .map(|(title, _)| title.to_string())
        .collect()
}

// =============================================================================
// Cache behaviour
// =============================================================================

#[test]
fn rebuild_is_served_from_cache_and_identical() {
    let p = Project::new();
    p.posts(3);

    let first = p.build();
    let index_before = p.output("index.html");
    let second = p.build();

    assert_eq!(first.cache_stats, CacheStats { hits: 0, misses: 3 });
    assert_eq!(second.cache_stats, CacheStats { hits: 3, misses: 0 });
    assert_eq!(statuses(&second), vec![SnippetStatus::Cached; 3]);
    assert_eq!(p.output("index.html"), index_before);
}

#[test]
fn editing_a_post_rerenders_only_that_post() {
    let p = Project::new();
    p.posts(3);
    p.build();

    p.post(
        "2026-01-02T12:00:00Z_day-2.md",
        "---\ntitle: Day 2 (revised)\n---\nEdited.\n",
    );
    let result = p.build();

    assert_eq!(
        statuses(&result),
        vec![
            SnippetStatus::Cached,
            SnippetStatus::Rendered,
            SnippetStatus::Cached,
        ]
    );
    assert!(p.output("index.html").contains("Day 2 (revised)"));
}

#[test]
fn editing_post_template_rerenders_everything() {
    let p = Project::new();
    p.posts(2);
    p.build();

    fs::write(
        p.root().join("templates/post.html"),
        "<section>{{ title }}{{ content }}</section>",
    )
    .unwrap();
    let result = p.build();

    assert_eq!(result.cache_stats, CacheStats { hits: 0, misses: 2 });
    assert!(p.output("index.html").contains("<section>Day 2"));
}

#[test]
fn editing_outline_template_keeps_cache() {
    let p = Project::new();
    p.posts(2);
    p.build();

    fs::write(
        p.root().join("templates/outline.html"),
        "<body>{{ posts }}</body>",
    )
    .unwrap();
    let result = p.build();

    assert_eq!(result.cache_stats, CacheStats { hits: 2, misses: 0 });
    assert!(p.output("index.html").starts_with("<body><article>"));
}

#[test]
fn cache_entry_holds_hash_of_post_and_template() {
    let p = Project::new();
    let raw = "---\ntitle: Hashed\n---\nbody\n";
    p.post("2026-02-05T21:38:22Z_hashed.md", raw);
    p.build();

    let entry = p.cache_entry("2026-02-05T21:38:22Z_hashed.md");
    assert_eq!(entry["hash"], snippet_hash(raw, POST_TEMPLATE));
    assert!(entry["html"].as_str().unwrap().starts_with("<article>"));
}

#[test]
fn corrupt_cache_entry_is_rerendered_and_repaired() {
    let p = Project::new();
    p.posts(1);
    p.build();
    let entry_path = p.root().join("cache/2026-01-01T12:00:00Z_day-1.md.json");
    fs::write(&entry_path, "{ not json").unwrap();

    let result = p.build();

    assert_eq!(statuses(&result), vec![SnippetStatus::Rendered]);
    assert!(p.cache_entry("2026-01-01T12:00:00Z_day-1.md")["hash"].is_string());
}

#[test]
fn no_cache_renders_all_but_still_writes_entries() {
    let p = Project::new();
    p.posts(2);
    p.build();

    let forced = p.build_with(false);
    assert_eq!(forced.cache_stats, CacheStats { hits: 0, misses: 2 });

    let after = p.build();
    assert_eq!(after.cache_stats, CacheStats { hits: 2, misses: 0 });
}

#[test]
fn orphaned_cache_entries_are_kept() {
    let p = Project::new();
    p.posts(2);
    p.build();
    fs::remove_file(p.root().join("input/2026-01-02T12:00:00Z_day-2.md")).unwrap();

    let result = p.build();

    assert_eq!(result.posts.len(), 1);
    assert!(p.root().join("cache/2026-01-02T12:00:00Z_day-2.md.json").exists());
    assert!(!p.root().join("output/2026-01-02T12:00:00Z_day-2").exists());
}

// =============================================================================
// Pagination and navigation
// =============================================================================

#[test]
fn zero_posts_writes_single_empty_index() {
    let p = Project::new();
    let result = p.build();

    assert_eq!(result.pages, 1);
    assert_eq!(
        p.output("index.html"),
        "<title>static-attic</title>\n<main>\n\n</main>\n<nav prev=\"\" next=\"\"></nav>\n"
    );
    assert!(!p.root().join("output/page").exists());
}

#[test]
fn twelve_posts_make_three_pages_newest_first() {
    let p = Project::new();
    p.posts(12);
    let result = p.build();

    assert_eq!(result.pages, 3);
    assert_eq!(
        titles_on(&p.output("index.html")),
        vec!["Day 12", "Day 11", "Day 10", "Day 9", "Day 8"]
    );
    assert_eq!(
        titles_on(&p.output("page/2/index.html")),
        vec!["Day 7", "Day 6", "Day 5", "Day 4", "Day 3"]
    );
    assert_eq!(
        titles_on(&p.output("page/3/index.html")),
        vec!["Day 2", "Day 1"]
    );
}

#[test]
fn index_pages_link_in_both_directions() {
    let p = Project::new();
    p.posts(11);
    p.build();

    assert!(p.output("index.html").contains(r#"<nav prev="" next="/page/2/">"#));
    assert!(p.output("page/2/index.html").contains(r#"<nav prev="/" next="/page/3/">"#));
    assert!(p.output("page/3/index.html").contains(r#"<nav prev="/page/2/" next="">"#));
}

#[test]
fn snippets_on_a_page_are_newline_joined() {
    let p = Project::new();
    p.posts(2);
    p.build();

    let index = p.output("index.html");
    assert!(index.contains("</article>\n<article>"));
}

#[test]
fn permalink_pages_follow_post_order() {
    let p = Project::new();
    p.posts(3);
    p.build();

    let middle = p.output("2026-01-02T12:00:00Z_day-2/index.html");
    assert!(middle.contains("<title>Day 2</title>"));
    assert!(middle.contains(
        r#"<nav prev="/2026-01-03T12:00:00Z_day-3/" next="/2026-01-01T12:00:00Z_day-1/">"#
    ));
    assert!(middle.contains(r#"<a href="/2026-01-02T12:00:00Z_day-2/">Day 2</a>"#));
}

#[test]
fn posts_per_page_from_config() {
    let p = Project::new();
    p.posts(4);
    fs::write(
        p.root().join("config.toml"),
        "posts_per_page = 2\nsite_name = \"Attic\"\n",
    )
    .unwrap();

    let result = p.build();

    assert_eq!(result.pages, 2);
    assert!(p.output("index.html").starts_with("<title>Attic</title>"));
    assert_eq!(titles_on(&p.output("page/2/index.html")), vec!["Day 2", "Day 1"]);
}

// =============================================================================
// Content handling
// =============================================================================

#[test]
fn drafts_excluded_from_pages_cache_and_counts() {
    let p = Project::new();
    p.posts(2);
    p.post("2026-03-01T00:00:00Z_secret.md", "---\ndraft: true\n---\nhidden\n");

    let result = p.build();

    assert_eq!(result.posts.len(), 2);
    assert!(!p.output("index.html").contains("hidden"));
    assert!(!p.root().join("output/2026-03-01T00:00:00Z_secret").exists());
    assert!(!p.root().join("cache/2026-03-01T00:00:00Z_secret.md.json").exists());
}

#[test]
fn invalid_date_prefix_still_builds() {
    let p = Project::new();
    p.post("notes.md", "---\ntitle: Loose\n---\nx\n");

    let result = p.build();

    assert_eq!(result.posts.len(), 1);
    assert!(p.output("notes/index.html").contains("Invalid Date"));
}

#[test]
fn images_copied_without_subdirectories() {
    let p = Project::new();
    let images = p.root().join("input/images");
    fs::create_dir_all(images.join("raw")).unwrap();
    fs::write(images.join("a.png"), [0u8, 1, 2]).unwrap();
    fs::write(images.join("raw/b.png"), [3u8]).unwrap();

    let result = p.build();

    assert_eq!(result.images, 1);
    assert_eq!(fs::read(p.root().join("output/images/a.png")).unwrap(), vec![0u8, 1, 2]);
    assert!(!p.root().join("output/images/raw").exists());
}

#[test]
fn custom_paths_from_config() {
    let p = Project::new();
    fs::rename(p.root().join("input"), p.root().join("posts")).unwrap();
    fs::write(p.root().join("posts/2026-01-01T00:00:00Z_moved.md"), "moved").unwrap();
    fs::write(
        p.root().join("config.toml"),
        "[paths]\ninput = \"posts\"\noutput = \"public\"\ncache = \".attic-cache\"\n",
    )
    .unwrap();

    let result = p.build();

    assert_eq!(result.output_dir, p.root().join("public"));
    assert!(p.root().join("public/2026-01-01T00:00:00Z_moved/index.html").is_file());
    assert!(p.root().join(".attic-cache/2026-01-01T00:00:00Z_moved.md.json").is_file());
    assert!(!p.root().join("output").exists());
}

#[test]
fn invalid_front_matter_aborts_build() {
    let p = Project::new();
    p.post("2026-01-01T00:00:00Z_bad.md", "---\ndraft: [\n---\n");
    let config = SiteConfig::default();
    let paths = SitePaths::resolve(p.root(), &config.paths);

    let err = generate::build(&paths, &config, true).unwrap_err();

    assert!(err.to_string().contains("2026-01-01T00:00:00Z_bad.md"));
}

#[test]
fn output_at_project_root_is_refused_before_anything_is_deleted() {
    let p = Project::new();
    p.post("2026-01-01T00:00:00Z_keep.md", "keep me");
    fs::write(p.root().join("config.toml"), "[paths]\noutput = \".\"\n").unwrap();

    assert!(config::load_config(p.root()).is_err());

    let unchecked: SiteConfig = toml::from_str("[paths]\noutput = \".\"\n").unwrap();
    let paths = SitePaths::resolve(p.root(), &unchecked.paths);
    let err = generate::build(&paths, &unchecked, true).unwrap_err();

    assert!(err.to_string().contains("project root"));
    assert_eq!(
        fs::read_to_string(p.root().join("input/2026-01-01T00:00:00Z_keep.md")).unwrap(),
        "keep me"
    );
    assert!(p.root().join("config.toml").is_file());
    assert!(p.root().join("templates/post.html").is_file());
}

#[test]
fn highlight_stylesheet_written_next_to_pages() {
    let p = Project::new();
    p.post("2026-01-01T00:00:00Z_code.md", "```rust\nfn main() {}\n```\n");

    p.build();

    assert!(p.output("highlight.css").contains("prefers-color-scheme: dark"));
    assert!(p.output("index.html").contains("<pre class=\"hl-code\">"));
}
