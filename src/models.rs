//! Data models for the GitHub data aggregator.
//!
//! This module contains the core data structures shared across the
//! application: repository snapshots as returned by the GitHub API and
//! the per-repository language fetch outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository as returned by the GitHub "list user repositories" endpoint.
///
/// Treated as an immutable snapshot per fetch; never persisted or mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Upstream numeric identifier.
    pub id: u64,
    /// Repository name (without owner).
    pub name: String,
    /// Full `owner/name` identifier.
    pub full_name: String,
    /// Free-text description, if any.
    pub description: Option<String>,
    /// Web URL of the repository.
    pub html_url: String,
    /// Star count.
    pub stargazers_count: u64,
    /// Primary language, if GitHub detected one.
    pub language: Option<String>,
    /// Topic tags, in upstream order.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Last-updated timestamp.
    pub updated_at: DateTime<Utc>,
    /// Whether this repository is a fork.
    pub fork: bool,
    /// Access classification (`public`, `private`, `internal`).
    #[serde(default)]
    pub visibility: String,
}

impl Repository {
    /// Whether this repository should appear in portfolio output.
    ///
    /// Only original (non-fork) public repositories qualify.
    pub fn is_showcased(&self) -> bool {
        !self.fork && self.visibility == "public"
    }
}

/// Outcome of one per-repository language breakdown request.
///
/// Failures are kept as a distinct variant instead of being dropped at
/// the call site so the reducer (and tests) can see which repositories
/// contributed nothing.
///
/// Languages are kept as ordered pairs, in upstream response order;
/// the ranking tie-break depends on first-encounter order.
#[derive(Debug, Clone)]
pub enum LanguageFetch {
    /// The request succeeded; `languages` pairs raw language names with byte counts.
    Complete {
        repo: String,
        languages: Vec<(String, u64)>,
    },
    /// The request failed; its contribution is simply absent.
    Failed { repo: String, reason: String },
}

impl LanguageFetch {
    /// Name of the repository this outcome belongs to.
    #[allow(dead_code)] // Utility for diagnostics
    pub fn repo(&self) -> &str {
        match self {
            LanguageFetch::Complete { repo, .. } => repo,
            LanguageFetch::Failed { repo, .. } => repo,
        }
    }

    /// Whether the fetch succeeded.
    pub fn is_complete(&self) -> bool {
        matches!(self, LanguageFetch::Complete { .. })
    }
}

/// Combined output of both fetch operations, used for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileData {
    /// Filtered repository list, most recently updated first.
    pub repositories: Vec<Repository>,
    /// Deduplicated language display names, most used first.
    pub languages: Vec<String>,
}
