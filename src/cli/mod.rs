//! Command-line interface for believr.
//!
//! Reads already-deserialized protocol records as JSON and prints what
//! the front-end would render: normalized URLs and post projections.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::config::{self, ResolvedConfig};
use crate::media::{MediaExtractor, MediaValue, UrlNormalizer};
use crate::post::{Feed, Post};

pub mod input;

/// believr - media URL normalization and post projection
#[derive(Parser, Debug)]
#[command(name = "believr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to .believr/config.yaml discovery)
    #[arg(long, global = true, env = "BELIEVR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize one or more media URLs
    Normalize {
        /// URLs (ipfs://, ar://, http(s):// or relative paths)
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Extract the URL from a JSON media value
    Media {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Project a JSON post into its display fields
    Project {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Project a JSON feed (array or {"items": [...]})
    Feed {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show resolved configuration
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = config::load_config(self.config.as_deref())
            .context("Failed to load configuration")?;

        if let Some(path) = &config.config_file {
            info!(path = %path.display(), "Using config file");
        }

        match self.command {
            Commands::Normalize { urls } => {
                for line in normalize_urls(&config, &urls) {
                    println!("{}", line);
                }
                Ok(())
            }
            Commands::Media { input } => {
                let raw = input::read_input(input.as_deref()).await?;
                println!("{}", extract_media(&config, &raw)?);
                Ok(())
            }
            Commands::Project { input, pretty } => {
                let raw = input::read_input(input.as_deref()).await?;
                println!("{}", project_post(&config, &raw, pretty)?);
                Ok(())
            }
            Commands::Feed { input, pretty } => {
                let raw = input::read_input(input.as_deref()).await?;
                println!("{}", project_feed(&config, &raw, pretty)?);
                Ok(())
            }
            Commands::Config => {
                show_config(&config);
                Ok(())
            }
        }
    }
}

/// Normalize each URL against the configured gateways
pub fn normalize_urls(config: &ResolvedConfig, urls: &[String]) -> Vec<String> {
    let normalizer = UrlNormalizer::new(config.gateways.clone());
    urls.iter().map(|url| normalizer.normalize(url)).collect()
}

/// Decode a JSON media value and extract its URL
pub fn extract_media(config: &ResolvedConfig, raw: &str) -> Result<String> {
    let media: MediaValue = input::parse_json(raw).context("Failed to parse media value")?;
    let extractor = MediaExtractor::new(UrlNormalizer::new(config.gateways.clone()));
    Ok(extractor.extract(&media))
}

/// Decode a JSON post and render its projection as JSON
pub fn project_post(config: &ResolvedConfig, raw: &str, pretty: bool) -> Result<String> {
    let post: Post = input::parse_json(raw).context("Failed to parse post")?;
    to_json(&config.projector().project(&post), pretty)
}

/// Decode a JSON feed and render its entries as a JSON array
pub fn project_feed(config: &ResolvedConfig, raw: &str, pretty: bool) -> Result<String> {
    let feed: Feed = input::parse_json(raw).context("Failed to parse feed")?;
    let entries = config.projector().project_feed(feed.posts());
    info!(posts = entries.len(), "Projected feed");
    to_json(&entries, pretty)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Show resolved configuration
fn show_config(config: &ResolvedConfig) {
    println!("believr configuration");
    println!("=====================");
    println!();

    if let Some(path) = &config.config_file {
        println!("Config file: {}", path.display());
    } else {
        println!("Config file: (none - using defaults)");
    }
    println!();

    println!("Gateways:");
    println!("  ipfs:    {}", config.gateways.ipfs);
    println!("  arweave: {}", config.gateways.arweave);
    println!();

    println!("Display:");
    println!("  untitled title: {}", config.untitled_title);
    println!();

    println!("Environment overrides:");
    for var in [
        config::ENV_IPFS_GATEWAY,
        config::ENV_ARWEAVE_GATEWAY,
        config::ENV_UNTITLED_TITLE,
    ] {
        match std::env::var(var) {
            Ok(value) => println!("  {}={}", var, value),
            Err(_) => println!("  {} (not set)", var),
        }
    }
}
