//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// portfolio-data - GitHub repository and language aggregator
///
/// Fetches a GitHub account's public non-fork repositories and the
/// languages used across them, for the portfolio site's Projects and
/// Skills sections.
///
/// Examples:
///   portfolio-data
///   portfolio-data --user octocat --format json
///   portfolio-data --languages-only
///   portfolio-data --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub account to aggregate
    ///
    /// Overrides the username from .portfolio-data.toml.
    #[arg(short, long, value_name = "USERNAME")]
    pub user: Option<String>,

    /// GitHub API token
    ///
    /// Optional. When set, language aggregation uses per-repository
    /// byte breakdowns instead of the primary-language fallback.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL
    ///
    /// Overrides the API endpoint (useful against a proxy).
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Only print the repository list
    #[arg(long, conflicts_with = "languages_only")]
    pub repos_only: bool,

    /// Only print the language list
    #[arg(long, conflicts_with = "repos_only")]
    pub languages_only: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .portfolio-data.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .portfolio-data.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the fetched data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref api_url) = self.api_url {
            if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(ref user) = self.user {
            if user.trim().is_empty() {
                return Err("Username must not be empty".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
