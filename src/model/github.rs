//! GitHub profile and repository aggregation

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Repositories requested per page
pub const REPOS_PER_PAGE: u32 = 100;
/// Repositories shown on the stars/forks chart
pub const REPO_CHART_LIMIT: usize = 7;
/// Repositories listed in the recent repositories panel
pub const REPO_LIST_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Profile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.login)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Stars and forks of one repository, for the bar chart
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoBar {
    pub name: String,
    pub stars: u32,
    pub forks: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GithubReport {
    pub profile: Profile,
    pub repositories: Vec<Repository>,
    pub language_stats: BTreeMap<String, usize>,
}

impl GithubReport {
    pub fn new(profile: Profile, repositories: Vec<Repository>) -> Self {
        let language_stats = language_stats(&repositories);
        Self { profile, repositories, language_stats }
    }

    pub fn total_stars(&self) -> u64 {
        self.repositories.iter().map(|r| r.stargazers_count as u64).sum()
    }

    pub fn total_forks(&self) -> u64 {
        self.repositories.iter().map(|r| r.forks_count as u64).sum()
    }

    pub fn top_repositories(&self) -> Vec<RepoBar> {
        top_repositories(&self.repositories, REPO_CHART_LIMIT)
    }

    /// First repositories in provider order, for the list panel
    pub fn recent_repositories(&self) -> &[Repository] {
        let end = self.repositories.len().min(REPO_LIST_LIMIT);
        &self.repositories[..end]
    }
}

/// Number of repositories per primary language; repositories without one are skipped
pub fn language_stats(repositories: &[Repository]) -> BTreeMap<String, usize> {
    let mut stats = BTreeMap::new();
    for language in repositories.iter().filter_map(|r| r.language.as_deref()) {
        *stats.entry(language.to_string()).or_insert(0) += 1;
    }
    stats
}

/// First `limit` repositories in provider order
pub fn top_repositories(repositories: &[Repository], limit: usize) -> Vec<RepoBar> {
    repositories
        .iter()
        .take(limit)
        .map(|r| RepoBar {
            name: r.name.clone(),
            stars: r.stargazers_count,
            forks: r.forks_count,
        })
        .collect()
}
