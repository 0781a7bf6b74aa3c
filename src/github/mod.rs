//! GitHub data aggregation.
//!
//! This module provides the client that fetches repositories and
//! aggregates language usage for the portfolio.

pub mod client;
pub mod languages;

pub use client::GitHubClient;
pub use languages::LanguageTotals;
