//! GitHub API client.
//!
//! Fetches the account's repositories and per-repository language
//! breakdowns. Both public operations are total: every failure is
//! logged and degrades to an empty result, so callers render "no data"
//! instead of an error.

use crate::config::GithubConfig;
use crate::github::languages::{self, LanguageTotals};
use crate::models::{LanguageFetch, Repository};
use futures::future;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Versioned JSON representation of the GitHub REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Upstream page cap for the repository listing.
const REPOS_PER_PAGE: u32 = 100;

/// Max repositories covered by the authenticated language fan-out.
///
/// Keeps one portfolio build well under the authenticated rate limit.
const LANGUAGE_FAN_OUT: usize = 30;

/// Error raised by individual API requests, before the public
/// operations collapse it to an empty result.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The upstream returned a non-success status.
    #[error("HTTP {0}")]
    Status(StatusCode),

    /// Transport failure or undecodable response body.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Client for the GitHub data aggregation pipeline.
///
/// Stateless between calls: each operation re-fetches. The credential
/// is injected at construction; no environment reads happen here.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    username: String,
    token: Option<String>,
    config: GithubConfig,
}

impl GitHubClient {
    /// Create a new client for the configured account.
    pub fn new(config: GithubConfig, token: Option<String>) -> Self {
        if token.is_some() {
            info!("GitHub token configured, using authenticated requests");
        } else {
            info!("No GitHub token, using unauthenticated fallback");
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("portfolio-data/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            token,
            config,
        }
    }

    /// Issue one GET request and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let mut request = self.http.get(url).header(ACCEPT, GITHUB_ACCEPT);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetch the account's public, non-fork repositories.
    ///
    /// One request, up to 100 results, most recently updated first.
    /// Any failure (transport, non-success status, malformed body) is
    /// logged as a warning and yields an empty vector.
    pub async fn fetch_repositories(&self) -> Vec<Repository> {
        let url = format!(
            "{}/users/{}/repos?per_page={}&sort=updated",
            self.api_url, self.username, REPOS_PER_PAGE
        );

        match self.get_json::<Vec<Repository>>(&url).await {
            Ok(repos) => {
                let filtered: Vec<Repository> =
                    repos.into_iter().filter(Repository::is_showcased).collect();
                debug!("Fetched {} showcased repositories", filtered.len());
                filtered
            }
            Err(e) => {
                warn!("GitHub API error listing repositories: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch the language breakdown for one repository.
    ///
    /// Failures settle to `LanguageFetch::Failed` rather than raising,
    /// so the fan-out can skip them and keep the rest.
    async fn repo_languages(&self, repo: &Repository) -> LanguageFetch {
        let url = format!(
            "{}/repos/{}/{}/languages",
            self.api_url, self.username, repo.name
        );

        // Decode through serde_json's map to keep upstream key order;
        // ranking ties resolve by first-encounter order.
        match self.get_json::<serde_json::Map<String, Value>>(&url).await {
            Ok(body) => LanguageFetch::Complete {
                repo: repo.name.clone(),
                languages: body
                    .into_iter()
                    .filter_map(|(language, bytes)| bytes.as_u64().map(|b| (language, b)))
                    .collect(),
            },
            Err(e) => {
                debug!("Skipping language breakdown for {}: {}", repo.name, e);
                LanguageFetch::Failed {
                    repo: repo.name.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Aggregate language usage across the account's repositories.
    ///
    /// With a token: parallel per-repository byte breakdowns for the 30
    /// most recently updated repositories. Without: primary-language
    /// presence counts from the listing alone, to stay under the
    /// unauthenticated rate limit. Returns deduplicated display names,
    /// most used first; empty when nothing qualifies or the upstream is
    /// unreachable.
    pub async fn fetch_languages(&self) -> Vec<String> {
        let repos = self.fetch_repositories().await;

        let totals = if self.token.is_some() {
            self.totals_from_breakdowns(&repos).await
        } else {
            languages::totals_from_primary(&repos, &self.config.excluded_languages)
        };

        totals.into_ranked(&self.config.display_names)
    }

    /// Authenticated strategy: concurrent fan-out, then one sequential
    /// reduction over the settled outcomes. No shared state during the
    /// fan-out, so no synchronization is needed.
    async fn totals_from_breakdowns(&self, repos: &[Repository]) -> LanguageTotals {
        let sample = &repos[..repos.len().min(LANGUAGE_FAN_OUT)];
        let outcomes =
            future::join_all(sample.iter().map(|repo| self.repo_languages(repo))).await;

        let failed = outcomes.iter().filter(|o| !o.is_complete()).count();
        if failed > 0 {
            debug!(
                "{} of {} language breakdown requests failed and were skipped",
                failed,
                outcomes.len()
            );
        }

        languages::reduce_fetches(&outcomes, &self.config.excluded_languages)
    }
}
