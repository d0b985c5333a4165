//! Binary entrypoint for the augtags CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `inspect` - list every catalog item that declares augment notetags
//! - `match <pattern> <tags...>` - test the wildcard matcher
//! - `run <script>` - execute a scripted augment session
//!
//! See the library crate docs for module-level details: `augtags::`.
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use augtags::augment::{matches_with_index, ItemCatalog};
use augtags::config::Config;
use augtags::logutil::init_logging;
use augtags::metrics;
use augtags::session::Session;

#[derive(Parser)]
#[command(name = "augtags")]
#[command(about = "Tag-gated augment rules for RPG equipment")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// List augment requirements, grants and rejection strings from the catalog
    Inspect {
        /// Catalog path (overrides the config file)
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Match a tag pattern against a list of tags
    Match {
        pattern: String,
        tags: Vec<String>,
    },
    /// Run a scripted augment session
    Run {
        /// Script file
        script: String,
        /// Catalog path (overrides the config file)
        #[arg(long)]
        catalog: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Missing config files fall back to defaults; malformed ones are errors.
fn load_config(path: &str) -> Result<Config> {
    if std::path::Path::new(path).exists() {
        Config::load(path)
    } else {
        Ok(Config::default())
    }
}

fn load_catalog(config: &Config, override_path: Option<String>) -> Result<ItemCatalog> {
    let path = override_path.unwrap_or_else(|| config.catalog.path.clone());
    ItemCatalog::load_from_json(&path).with_context(|| format!("Failed to load catalog {}", path))
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Init => {
            init_logging(None, cli.verbose);
            Config::create_default(&cli.config)?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Inspect { catalog } => {
            let config = load_config(&cli.config)?;
            init_logging(Some(&config.logging), cli.verbose);
            let catalog = load_catalog(&config, catalog)?;
            for (record, profile) in catalog.annotated() {
                println!("{} ({})", record.id, record.name);
                if !profile.requirements().is_empty() {
                    println!("  requires: {}", profile.requirements().join(", "));
                }
                if !profile.granted_tags().is_empty() {
                    println!("  grants:   {}", profile.granted_tags().join(", "));
                }
                if !profile.rejection_string().is_empty() {
                    println!("  rejects:  {}", profile.rejection_string());
                }
            }
        }
        Commands::Match { pattern, tags } => {
            init_logging(None, cli.verbose);
            match matches_with_index(&pattern, &tags) {
                Some(idx) => println!("{} matches {} (index {})", pattern, tags[idx], idx),
                None => {
                    println!("{} matches nothing", pattern);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Run { script, catalog } => {
            let config = load_config(&cli.config)?;
            init_logging(Some(&config.logging), cli.verbose);
            let catalog = load_catalog(&config, catalog)?;
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read script {}", script))?;
            let mut session = Session::new(catalog, config);
            for line in session.run_script(&text)? {
                println!("{}", line);
            }
            let stats = metrics::snapshot();
            info!(
                "session done: {} installs, {} rejections, {} removals",
                stats.installs, stats.rejections, stats.removals
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}
