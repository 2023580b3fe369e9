//! unitkb CLI - inspect the systemd unit-file knowledge base
//!
//! # Usage
//!
//! ```bash
//! # List sections
//! unitkb sections
//!
//! # Show a section's settings
//! unitkb settings Service
//!
//! # Show one setting
//! unitkb show Service Type
//!
//! # Check a custom catalog
//! unitkb --catalog my-units.yaml validate
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use unitkb::KnowledgeBase;

#[derive(Parser)]
#[command(name = "unitkb")]
#[command(about = "Inspect the systemd unit-file knowledge base")]
#[command(version)]
struct Cli {
    /// Catalog file to use instead of the built-in one
    #[arg(long, env = "UNITKB_PATH")]
    catalog: Option<PathBuf>,

    /// Output JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all sections
    Sections,

    /// List the settings of a section
    Settings {
        /// Section name (e.g. Service)
        section: String,
    },

    /// Show one setting
    Show {
        /// Section name
        section: String,

        /// Setting name
        setting: String,
    },

    /// Load the catalog and report statistics
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let kb = match &cli.catalog {
        Some(path) => KnowledgeBase::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => KnowledgeBase::builtin().context("Failed to load built-in catalog")?,
    };

    match cli.command {
        Commands::Sections => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(kb.sections())?);
            } else {
                for section in kb.sections() {
                    println!("[{}] ({} settings)", section.name, section.settings.len());
                }
            }
        }

        Commands::Settings { section } => {
            let Some(settings) = kb.settings(&section) else {
                bail!("Unknown section: {}", section);
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(settings)?);
            } else {
                for setting in settings {
                    if setting.is_enumerated() {
                        println!("{}= ({})", setting.name, setting.choices.join(" | "));
                    } else {
                        println!("{}=", setting.name);
                    }
                }
            }
        }

        Commands::Show { section, setting } => {
            let Some(found) = kb.settings(&section).and_then(|s| s.get(&setting)) else {
                bail!("Unknown setting: [{}] {}", section, setting);
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(found)?);
            } else {
                println!("[{}] {}=", section, found.name);
                if found.is_enumerated() {
                    println!("Values: {}", found.choices.join(", "));
                }
                println!();
                println!("{}", found.doc);
            }
        }

        Commands::Validate => {
            let stats = kb.stats();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Catalog OK");
                println!("  Sections:             {}", stats.sections);
                println!("  Settings:             {}", stats.settings);
                println!("  Enumerated settings:  {}", stats.enumerated_settings);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["unitkb", "show", "Service", "Type"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_requires_section() {
        let cli = Cli::try_parse_from(["unitkb", "settings"]);
        assert!(cli.is_err());
    }
}
