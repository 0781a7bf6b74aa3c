//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.portfolio-data.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// GitHub aggregation settings.
    #[serde(default)]
    pub github: GithubConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

/// GitHub data aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// GitHub account to aggregate.
    #[serde(default = "default_username")]
    pub username: String,

    /// GitHub API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Languages excluded from aggregation.
    ///
    /// Build tools, config formats, and markup that aren't real skills.
    #[serde(default = "default_excluded_languages")]
    pub excluded_languages: HashSet<String>,

    /// Maps GitHub language names to the display names shown in Skills.
    ///
    /// Several raw names may share one display bucket (HTML, CSS, and
    /// SCSS all render as "HTML/CSS"). Names absent from the table pass
    /// through unchanged.
    #[serde(default = "default_display_names")]
    pub display_names: HashMap<String, String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            api_url: default_api_url(),
            excluded_languages: default_excluded_languages(),
            display_names: default_display_names(),
        }
    }
}

fn default_username() -> String {
    "SalShah20".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_excluded_languages() -> HashSet<String> {
    // GitHub's linguist reports both "Vim Script" and "Vim script"
    // depending on API version.
    vec![
        "Makefile",
        "Dockerfile",
        "Shell",
        "Batchfile",
        "PowerShell",
        "CMake",
        "YAML",
        "JSON",
        "TOML",
        "INI",
        "Nix",
        "Vim Script",
        "Vim script",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_display_names() -> HashMap<String, String> {
    vec![
        ("C++", "C++"),
        ("C", "C"),
        ("C#", "C#"),
        ("Python", "Python"),
        ("JavaScript", "JavaScript"),
        ("TypeScript", "TypeScript"),
        ("Java", "Java"),
        ("HTML", "HTML/CSS"),
        ("CSS", "HTML/CSS"),
        ("SCSS", "HTML/CSS"),
        ("MATLAB", "MATLAB"),
        ("Rust", "Rust"),
        ("Go", "Go"),
        ("Ruby", "Ruby"),
        ("Swift", "Swift"),
        ("Kotlin", "Kotlin"),
        ("Assembly", "Assembly"),
        ("Lua", "Lua"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".portfolio-data.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref user) = args.user {
            self.github.username = user.clone();
        }

        if let Some(ref api_url) = args.api_url {
            self.github.api_url = api_url.clone();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
