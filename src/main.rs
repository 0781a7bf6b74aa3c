//! portfolio-data - GitHub data aggregator for a portfolio site
//!
//! A CLI tool that fetches a GitHub account's public non-fork
//! repositories and the languages used across them, feeding the
//! portfolio's Projects and Skills sections.
//!
//! Exit codes:
//!   0 - Success (empty results are not an error)
//!   1 - Runtime error (invalid arguments, unreadable config)

mod cli;
mod config;
mod github;
mod models;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use github::GitHubClient;
use models::ProfileData;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("portfolio-data v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_fetch(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Fetch failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .portfolio-data.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".portfolio-data.toml");

    if path.exists() {
        eprintln!("⚠️  .portfolio-data.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .portfolio-data.toml")?;

    println!("✅ Created .portfolio-data.toml with default settings.");
    println!("   Edit it to customize username, excluded languages, and display names.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the fetch and print the results.
async fn run_fetch(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    info!("Aggregating GitHub data for {}", config.github.username);

    // Credential is resolved once here and injected; the client never
    // reads the environment itself.
    let client = GitHubClient::new(config.github.clone(), args.token.clone());

    let repositories = if args.languages_only {
        Vec::new()
    } else {
        client.fetch_repositories().await
    };

    let languages = if args.repos_only {
        Vec::new()
    } else {
        client.fetch_languages().await
    };

    let data = ProfileData {
        repositories,
        languages,
    };

    match args.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&data).context("Failed to serialize output")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_text(&args, &data),
    }

    Ok(())
}

/// Print a human-readable summary of the fetched data.
fn print_text(args: &Args, data: &ProfileData) {
    if !args.languages_only {
        println!("📦 Projects ({}):", data.repositories.len());
        if data.repositories.is_empty() {
            println!("   (no data available)");
        }
        for repo in &data.repositories {
            let stars = if repo.stargazers_count > 0 {
                format!(" ⭐ {}", repo.stargazers_count)
            } else {
                String::new()
            };
            println!("   {}{}", repo.name, stars);
            if let Some(ref description) = repo.description {
                println!("     {}", description);
            }
        }
    }

    if !args.repos_only {
        println!("\n🛠  Skills ({}):", data.languages.len());
        if data.languages.is_empty() {
            println!("   (no data available)");
        }
        for language in &data.languages {
            println!("   {}", language);
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .portfolio-data.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
