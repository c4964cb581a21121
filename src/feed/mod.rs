//! Repository showcase feed: the public profile and the most-starred
//! non-fork repositories of one account.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "github")]
pub mod client;

#[cfg(feature = "github")]
pub use client::FeedClient;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{resource} request failed with status {status}")]
    Status { resource: &'static str, status: u16 },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[cfg(feature = "github")]
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Repository record as returned by the API; fields we don't show are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    /// Sent as `null` by some API versions.
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub fork: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
}

impl From<RawRepository> for Repository {
    fn from(raw: RawRepository) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            url: raw.html_url,
            stars: raw.stargazers_count,
            language: raw.language,
            topics: raw.topics.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub login: String,
    /// Display name, or the login when the account has none set.
    pub name: String,
    pub bio: Option<String>,
    pub followers: u64,
    pub public_repos: u64,
    pub avatar_url: Option<String>,
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        let name = raw
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| raw.login.clone());

        Self {
            login: raw.login,
            name,
            bio: raw.bio,
            followers: raw.followers,
            public_repos: raw.public_repos,
            avatar_url: raw.avatar_url,
        }
    }
}

/// Drops forks and keeps at most `max` entries, preserving API order.
pub fn select_repositories(raw: Vec<RawRepository>, max: usize) -> Vec<Repository> {
    raw.into_iter()
        .filter(|repo| !repo.fork)
        .take(max)
        .map(Repository::from)
        .collect()
}

pub fn parse_repositories(body: &str, max: usize) -> Result<Vec<Repository>, FeedError> {
    let raw: Vec<RawRepository> = serde_json::from_str(body)?;
    Ok(select_repositories(raw, max))
}

pub fn parse_profile(body: &str) -> Result<Profile, FeedError> {
    let raw: RawProfile = serde_json::from_str(body)?;
    Ok(raw.into())
}

/// Result of one feed load. There is no retry: `Failed` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Loading,
    Ready {
        profile: Profile,
        repositories: Vec<Repository>,
    },
    Failed(String),
}

impl FeedState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading)
    }

    pub fn repositories(&self) -> &[Repository] {
        match self {
            FeedState::Ready { repositories, .. } => repositories,
            _ => &[],
        }
    }
}
