use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    pub username: String,
    pub api_base: String,
    /// Page size requested from the API before forks are filtered out.
    pub per_page: u32,
    pub max_repos: usize,
    pub user_agent: String,
}

impl FeedConfig {
    pub fn profile_url(&self) -> String {
        format!("{}/users/{}", self.api_base.trim_end_matches('/'), self.username)
    }

    pub fn repos_url(&self) -> String {
        format!(
            "{}/users/{}/repos?sort=stars&per_page={}",
            self.api_base.trim_end_matches('/'),
            self.username,
            self.per_page
        )
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            username: "shanskarBansal".to_string(),
            api_base: "https://api.github.com".to_string(),
            per_page: 30,
            max_repos: 12,
            user_agent: concat!("traffic-canvas/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Validate for FeedConfig {
    fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(anyhow!("Feed username must not be empty"));
        }

        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(anyhow!("Feed API base '{}' must be an http(s) URL", self.api_base));
        }

        if self.per_page == 0 || self.per_page > 100 {
            return Err(anyhow!("Feed page size must be in range [1, 100]"));
        }

        if self.max_repos == 0 {
            return Err(anyhow!("Feed must show at least one repository"));
        }

        Ok(())
    }
}
