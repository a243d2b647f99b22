use chrono::Utc;
use clap::{Parser, Subcommand};
use static_attic::config::{self, SitePaths};
use static_attic::scaffold::{self, ScaffoldError};
use static_attic::{generate, naming, output, validate};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ATTIC_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("ATTIC_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "static-attic")]
#[command(about = "Static site generator for dated markdown posts")]
#[command(long_about = "\
Static site generator for dated markdown posts

Every post is one markdown file named after the moment it was written.
Posts are rendered newest first into paginated index pages plus one
permalink page each.

Project structure:

  blog/
  ├── config.toml                           # Optional, see gen-config
  ├── input/
  │   ├── 2026-02-05T21:38:22Z_arpeggiator.md
  │   ├── 2026-02-07T09:00:00Z_untitled.md  # draft: true → skipped
  │   └── images/                           # Copied to output/images/
  ├── templates/
  │   ├── post.html                         # One post snippet
  │   └── outline.html                      # Page around snippets
  ├── cache/                                # Rendered snippets (generated)
  └── output/                               # The site (regenerated each build)

Front matter (all optional):

  ---
  title: Arpeggiator
  draft: false
  ---

Run 'static-attic gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project root holding config.toml, input/, and templates/
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render all published posts into the output directory
    Build {
        /// Ignore cached snippets and render every post
        #[arg(long)]
        no_cache: bool,
    },
    /// Create a new draft post stamped with the current UTC time
    New {
        /// Lowercase letters, numbers, and hyphens
        #[arg(default_value = naming::DEFAULT_SLUG)]
        slug: String,
    },
    /// Check post filenames and front matter without building
    Validate,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build { no_cache } => {
            let config = config::load_config(&cli.root)?;
            let paths = SitePaths::resolve(&cli.root, &config.paths);
            let result = generate::build(&paths, &config, !no_cache)?;
            output::print_build_output(&result)?;
        }
        Command::New { slug } => {
            let config = config::load_config(&cli.root)?;
            let paths = SitePaths::resolve(&cli.root, &config.paths);
            match scaffold::create_post(&paths.input, &slug, Utc::now()) {
                Ok(path) => {
                    let name = path.file_name().unwrap_or_default().to_string_lossy();
                    println!("Created {}", name);
                }
                Err(e @ (ScaffoldError::InvalidSlug(_) | ScaffoldError::AlreadyExists(_))) => {
                    eprintln!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Validate => {
            let config = config::load_config(&cli.root)?;
            let paths = SitePaths::resolve(&cli.root, &config.paths);
            let report = validate::validate_dir(&paths.input)?;
            output::print_validation_report(&report);
            if !report.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}
