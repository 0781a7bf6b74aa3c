//! Language usage aggregation.
//!
//! Pure reduction logic shared by both aggregation strategies: merge
//! per-repository contributions into weighted totals, then rank, remap
//! to display names, and deduplicate. Kept free of any network code so
//! the ordering and dedup rules are directly testable.

use crate::models::{LanguageFetch, Repository};
use std::collections::{HashMap, HashSet};

/// Insertion-ordered language name → cumulative weight mapping.
///
/// Weights are byte counts in authenticated mode and presence counts in
/// fallback mode; the two are only comparable within one invocation.
/// Insertion order is preserved so that equal weights rank in the order
/// the language was first encountered.
#[derive(Debug, Clone, Default)]
pub struct LanguageTotals {
    entries: Vec<(String, u64)>,
}

impl LanguageTotals {
    /// Creates an empty totals mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to `language`'s running total.
    ///
    /// First sight of a language appends it; the language set stays
    /// small enough that a linear scan beats maintaining an index.
    pub fn add(&mut self, language: &str, weight: u64) {
        match self.entries.iter_mut().find(|(name, _)| name == language) {
            Some((_, total)) => *total += weight,
            None => self.entries.push((language.to_string(), weight)),
        }
    }

    /// Total recorded for a language, if any.
    #[allow(dead_code)] // Utility for inspection
    pub fn get(&self, language: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, total)| *total)
    }

    /// Whether no language has been recorded.
    #[allow(dead_code)] // Utility for inspection
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranks the totals and produces the final display-name list.
    ///
    /// Sorts descending by weight (stable, so ties keep first-encounter
    /// order), maps raw names through the display table, and dedups
    /// while preserving order. A higher-ranked raw name claims the slot
    /// for a shared display name.
    pub fn into_ranked(self, display_names: &HashMap<String, String>) -> Vec<String> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        let mut seen = HashSet::new();
        entries
            .into_iter()
            .map(|(name, _)| display_names.get(&name).cloned().unwrap_or(name))
            .filter(|display| seen.insert(display.clone()))
            .collect()
    }
}

/// Reduces settled per-repository fetch outcomes into language totals.
///
/// Failed fetches contribute nothing; excluded languages are dropped at
/// accumulation time. Outcomes are reduced in the order given, which
/// follows the repository order of the fan-out.
pub fn reduce_fetches(outcomes: &[LanguageFetch], excluded: &HashSet<String>) -> LanguageTotals {
    let mut totals = LanguageTotals::new();

    for outcome in outcomes {
        if let LanguageFetch::Complete { languages, .. } = outcome {
            for (language, bytes) in languages {
                if !excluded.contains(language.as_str()) {
                    totals.add(language, *bytes);
                }
            }
        }
    }

    totals
}

/// Builds totals from primary-language fields alone.
///
/// The unauthenticated fallback: one presence count per repository,
/// no extra API calls.
pub fn totals_from_primary(repos: &[Repository], excluded: &HashSet<String>) -> LanguageTotals {
    let mut totals = LanguageTotals::new();

    for repo in repos {
        if let Some(ref language) = repo.language {
            if !language.is_empty() && !excluded.contains(language) {
                totals.add(language, 1);
            }
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn complete(repo: &str, languages: &[(&str, u64)]) -> LanguageFetch {
        LanguageFetch::Complete {
            repo: repo.to_string(),
            languages: languages
                .iter()
                .map(|&(name, bytes)| (name.to_string(), bytes))
                .collect(),
        }
    }

    fn failed(repo: &str) -> LanguageFetch {
        LanguageFetch::Failed {
            repo: repo.to_string(),
            reason: "HTTP 403".to_string(),
        }
    }

    fn repo_with_language(name: &str, language: Option<&str>) -> Repository {
        Repository {
            id: 1,
            name: name.to_string(),
            full_name: format!("someone/{}", name),
            description: None,
            html_url: format!("https://github.com/someone/{}", name),
            stargazers_count: 0,
            language: language.map(String::from),
            topics: Vec::new(),
            updated_at: Utc::now(),
            fork: false,
            visibility: "public".to_string(),
        }
    }

    fn excluded() -> HashSet<String> {
        crate::config::GithubConfig::default().excluded_languages
    }

    fn display_names() -> HashMap<String, String> {
        crate::config::GithubConfig::default().display_names
    }

    #[test]
    fn test_totals_merge_across_repos() {
        let outcomes = vec![
            complete("a", &[("TypeScript", 500)]),
            complete("b", &[("TypeScript", 300), ("CSS", 100)]),
        ];

        let totals = reduce_fetches(&outcomes, &excluded());
        assert_eq!(totals.get("TypeScript"), Some(800));
        assert_eq!(totals.get("CSS"), Some(100));

        let ranked = totals.into_ranked(&display_names());
        assert_eq!(ranked, vec!["TypeScript", "HTML/CSS"]);
    }

    #[test]
    fn test_failed_fetch_contributes_nothing() {
        let outcomes = vec![complete("a", &[("Rust", 900)]), failed("b")];

        let totals = reduce_fetches(&outcomes, &excluded());
        let ranked = totals.into_ranked(&display_names());
        assert_eq!(ranked, vec!["Rust"]);
    }

    #[test]
    fn test_excluded_languages_never_surface() {
        let outcomes = vec![complete("a", &[("Python", 400), ("YAML", 9000), ("Makefile", 50)])];

        let totals = reduce_fetches(&outcomes, &excluded());
        assert_eq!(totals.get("YAML"), None);
        assert_eq!(totals.into_ranked(&display_names()), vec!["Python"]);
    }

    #[test]
    fn test_display_dedup_keeps_higher_ranked_slot() {
        // CSS outweighs Go; HTML trails both. HTML and CSS share the
        // "HTML/CSS" bucket, so the bucket ranks where CSS ranked.
        let outcomes = vec![complete("a", &[("CSS", 500), ("Go", 300), ("HTML", 100)])];

        let ranked = reduce_fetches(&outcomes, &excluded()).into_ranked(&display_names());
        assert_eq!(ranked, vec!["HTML/CSS", "Go"]);
    }

    #[test]
    fn test_ties_rank_by_first_encounter() {
        let outcomes = vec![complete("a", &[("Swift", 200)]), complete("b", &[("Lua", 200)])];

        let ranked = reduce_fetches(&outcomes, &excluded()).into_ranked(&display_names());
        assert_eq!(ranked, vec!["Swift", "Lua"]);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let outcomes = vec![
            complete("a", &[("Rust", 100), ("C", 100)]),
            complete("b", &[("Python", 300)]),
        ];

        let first = reduce_fetches(&outcomes, &excluded()).into_ranked(&display_names());
        let second = reduce_fetches(&outcomes, &excluded()).into_ranked(&display_names());
        assert_eq!(first, second);
        assert_eq!(first, vec!["Python", "Rust", "C"]);
    }

    #[test]
    fn test_primary_language_fallback() {
        let repos = vec![
            repo_with_language("a", Some("Python")),
            repo_with_language("b", Some("Python")),
            repo_with_language("c", Some("Go")),
            repo_with_language("d", Some("YAML")),
            repo_with_language("e", None),
        ];

        let totals = totals_from_primary(&repos, &excluded());
        assert_eq!(totals.get("Python"), Some(2));
        assert_eq!(totals.get("Go"), Some(1));
        assert_eq!(totals.get("YAML"), None);

        let ranked = totals.into_ranked(&display_names());
        assert_eq!(ranked, vec!["Python", "Go"]);
    }

    #[test]
    fn test_fallback_over_filtered_listing() {
        // A fork and a config-language repo in the listing: the fork
        // drops out of the repository list, the YAML repo stays listed
        // but contributes no skill.
        let mut fork = repo_with_language("b", Some("Go"));
        fork.fork = true;

        let listing = vec![
            repo_with_language("a", Some("Python")),
            fork,
            repo_with_language("c", Some("YAML")),
        ];

        let showcased: Vec<Repository> = listing
            .into_iter()
            .filter(Repository::is_showcased)
            .collect();
        let names: Vec<&str> = showcased.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);

        let ranked = totals_from_primary(&showcased, &excluded()).into_ranked(&display_names());
        assert_eq!(ranked, vec!["Python"]);
    }

    #[test]
    fn test_empty_inputs_yield_empty_output() {
        let totals = reduce_fetches(&[], &excluded());
        assert!(totals.is_empty());
        assert!(totals.into_ranked(&display_names()).is_empty());

        let totals = totals_from_primary(&[], &excluded());
        assert!(totals.into_ranked(&display_names()).is_empty());
    }

    #[test]
    fn test_unknown_language_passes_through() {
        let outcomes = vec![complete("a", &[("Zig", 700)])];

        let ranked = reduce_fetches(&outcomes, &excluded()).into_ranked(&display_names());
        assert_eq!(ranked, vec!["Zig"]);
    }
}
