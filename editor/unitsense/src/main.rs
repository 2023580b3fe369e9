//! Unitsense CLI - Context-aware completion and hover for systemd unit files
//!
//! # Usage
//!
//! ```bash
//! # Get completions at position
//! unitsense complete foo.service --line 10 --column 6
//!
//! # Get hover info
//! unitsense hover foo.service --line 10 --column 2
//!
//! # Read the document from stdin
//! cat foo.service | unitsense complete - -l 10 -c 6
//!
//! # Catalog statistics
//! unitsense stats
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use unitsense::{Engine, EngineOptions, KnowledgeBase};

#[derive(Parser)]
#[command(name = "unitsense")]
#[command(about = "Context-aware completion and hover for systemd unit files")]
#[command(version)]
struct Cli {
    /// Catalog file to use instead of the built-in one
    #[arg(long, env = "UNITKB_PATH")]
    data: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, short, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Get completions at position
    Complete {
        /// Path to unit file, or - for stdin
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long, short)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, short)]
        column: u32,

        /// Maximum completions to return
        #[arg(long)]
        max: Option<usize>,

        /// Rank value choices by the partially typed value
        #[arg(long)]
        filter_values: bool,

        /// Offer only sections that apply to the file's unit type
        #[arg(long)]
        match_file: bool,
    },

    /// Get hover information at position
    Hover {
        /// Path to unit file, or - for stdin
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long, short)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, short)]
        column: u32,
    },

    /// Parse and show cursor context
    Context {
        /// Path to unit file, or - for stdin
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long, short)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, short)]
        column: u32,
    },

    /// List catalog sections
    Sections,

    /// Show catalog statistics
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let kb = match &cli.data {
        Some(path) => KnowledgeBase::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => KnowledgeBase::builtin().context("Failed to load built-in catalog")?,
    };
    let engine = Engine::new(Arc::new(kb));

    match cli.command {
        Commands::Complete {
            file,
            line,
            column,
            max,
            filter_values,
            match_file,
        } => {
            let mut options = EngineOptions::default()
                .with_filter_values(filter_values)
                .with_match_sections_to_file(match_file);
            options.max_completions = max;

            let engine = engine.with_options(options);
            let source = read_source(&file)?;
            let result = engine.complete_in_file(file_name(&file), &source, line, column);

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Text => {
                    if result.items.is_empty() {
                        println!("No completions found");
                    } else {
                        let more = if result.is_incomplete { "+" } else { "" };
                        println!("Completions ({}{}):", result.items.len(), more);
                        for item in &result.items {
                            let detail = item.detail.as_deref().unwrap_or("");
                            println!("  {:28} {:8} {}", item.label, item.kind.label(), detail);
                        }
                    }
                }
            }
        }

        Commands::Hover { file, line, column } => {
            let source = read_source(&file)?;
            let result = engine.hover(&source, line, column);

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Text => match result {
                    Some(info) => println!("{}", info.contents),
                    None => println!("No hover information"),
                },
            }
        }

        Commands::Context { file, line, column } => {
            let source = read_source(&file)?;
            let ctx = engine.context(&source, line, column);

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&ctx)?);
                }
                OutputFormat::Text => {
                    println!("Cursor Context at {}:{}", line, column);
                    println!("  Kind:        {:?}", ctx.kind);
                    println!("  Prefix:      {:?}", ctx.prefix);
                    println!("  Line start:  {:?}", ctx.line_start);
                    if let Some(range) = ctx.word_range {
                        println!("  Word range:  {}..{}", range.start_col, range.end_col);
                    }
                }
            }
        }

        Commands::Sections => {
            let kb = engine.knowledge();

            match cli.format {
                OutputFormat::Json => {
                    #[derive(serde::Serialize)]
                    struct SectionOutput<'a> {
                        name: &'a str,
                        file_match: Option<&'a str>,
                        settings: usize,
                    }

                    let output: Vec<_> = kb
                        .sections()
                        .iter()
                        .map(|s| SectionOutput {
                            name: &s.name,
                            file_match: s.file_match.as_deref(),
                            settings: s.settings.len(),
                        })
                        .collect();

                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    for section in kb.sections() {
                        println!("[{}] ({} settings)", section.name, section.settings.len());
                    }
                }
            }
        }

        Commands::Stats => {
            let stats = engine.stats();

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                }
                OutputFormat::Text => {
                    println!("Catalog Statistics:");
                    println!("  Sections:             {}", stats.sections);
                    println!("  Settings:             {}", stats.settings);
                    println!("  Enumerated settings:  {}", stats.enumerated_settings);
                }
            }
        }
    }

    Ok(())
}

/// Read a document from a file, or stdin for `-`.
fn read_source(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }

    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn file_name(file: &Path) -> Option<&str> {
    file.file_name().and_then(|name| name.to_str()).filter(|name| *name != "-")
}
