// src/github/repos.rs
// =============================================================================
// Repository listing: fetch, filter, sort, and turn into cards.
//
// Endpoint: GET {api_base}/users/{owner}/repos?sort=updated&direction=desc
//
// The API sorts by update time, but the page shows repositories
// alphabetically, without the portfolio's own hosting repositories.
// =============================================================================

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::GithubClient;
use crate::config::SiteConfig;

// One repository as returned by the listing API
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
}

// What the page shows for one repository
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoCard {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// CSS class of the language dot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_color: Option<String>,
    pub stars: u64,
    /// "3d ago", "just now", ...
    pub updated: String,
    pub github_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Staggered reveal: each card appears 100ms after the previous one
    pub reveal_delay_ms: u64,
}

pub const EMPTY_LISTING_MESSAGE: &str = "No other public repositories found.";
pub const LISTING_FAILED_MESSAGE: &str = "Could not load projects. Please try again later.";

const NO_DESCRIPTION: &str = "No description available.";
const FALLBACK_COLOR: &str = "bg-gray-400";

const LANGUAGE_COLORS: [(&str, &str); 12] = [
    ("JavaScript", "bg-yellow-400"),
    ("TypeScript", "bg-blue-400"),
    ("Python", "bg-green-400"),
    ("Go", "bg-cyan-400"),
    ("Rust", "bg-orange-400"),
    ("Ruby", "bg-red-400"),
    ("Java", "bg-amber-500"),
    ("C#", "bg-purple-400"),
    ("C++", "bg-indigo-400"),
    ("HTML", "bg-red-300"),
    ("CSS", "bg-blue-300"),
    ("Shell", "bg-emerald-400"),
];

impl GithubClient {
    // Fetches the owner's public repositories (one request, no pagination)
    pub async fn list_repos(&self, owner: &str) -> Result<Vec<RepoRecord>> {
        let url = format!(
            "{}/users/{}/repos?sort=updated&direction=desc",
            self.api_base, owner
        );
        debug!(%url, "fetching repository listing");

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "GitHub API returned a {} status.",
                response.status().as_u16()
            ));
        }

        let repos = response.json::<Vec<RepoRecord>>().await?;
        debug!(count = repos.len(), "repository listing received");
        Ok(repos)
    }
}

// What the projects section ends up showing
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Cards(Vec<RepoCard>),
    /// Nothing left after the exclusions
    Empty,
    /// The listing request failed
    Failed,
}

impl Listing {
    // Filters, sorts and builds cards, or records the failure
    pub fn from_result(result: Result<Vec<RepoRecord>>, config: &SiteConfig, now: DateTime<Utc>) -> Self {
        let repos = match result {
            Ok(repos) => repos,
            Err(e) => {
                warn!(error = %e, "Failed to fetch GitHub repositories");
                return Listing::Failed;
            }
        };

        let cards = build_cards(&filter_and_sort(repos, config), config, now);
        if cards.is_empty() {
            Listing::Empty
        } else {
            Listing::Cards(cards)
        }
    }

    // The text shown in place of the cards, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Listing::Cards(_) => None,
            Listing::Empty => Some(EMPTY_LISTING_MESSAGE),
            Listing::Failed => Some(LISTING_FAILED_MESSAGE),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Listing::Failed)
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_failure() {
            1
        } else {
            0
        }
    }

    // Cards as a JSON array; a failure becomes an {error, message} object
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Listing::Cards(cards) => serde_json::to_value(cards),
            Listing::Empty => Ok(serde_json::json!([])),
            Listing::Failed => Ok(serde_json::json!({
                "error": "listing_failed",
                "message": LISTING_FAILED_MESSAGE,
            })),
        }
    }
}

// Drops excluded repositories and sorts the rest alphabetically
pub fn filter_and_sort(repos: Vec<RepoRecord>, config: &SiteConfig) -> Vec<RepoRecord> {
    let mut kept: Vec<RepoRecord> = repos
        .into_iter()
        .filter(|repo| !config.is_excluded(&repo.name))
        .collect();

    kept.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    kept
}

// Builds one card per repository, keeping the order
pub fn build_cards(repos: &[RepoRecord], config: &SiteConfig, now: DateTime<Utc>) -> Vec<RepoCard> {
    repos
        .iter()
        .enumerate()
        .map(|(index, repo)| RepoCard {
            name: repo.name.clone(),
            description: repo
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            language_color: repo.language.as_deref().map(|lang| language_color(lang).to_string()),
            language: repo.language.clone(),
            stars: repo.stargazers_count,
            updated: format_relative_time(repo.updated_at, now),
            github_url: repo.html_url.clone(),
            website: config.website_for(&repo.name).map(str::to_string),
            reveal_delay_ms: index as u64 * 100,
        })
        .collect()
}

fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

// Human-readable age of a timestamp.
// Older than four weeks falls back to a plain date.
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let days = elapsed.num_days();
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes();

    if days > 28 {
        then.format("%-m/%-d/%Y").to_string()
    } else if days >= 1 {
        format!("{}d ago", days)
    } else if hours >= 1 {
        format!("{}h ago", hours)
    } else if minutes >= 1 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}
