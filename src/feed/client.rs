use log::{debug, warn};
use reqwest::{Client, Response};

use super::{parse_profile, parse_repositories, FeedError, FeedState, Profile, Repository};
use crate::config::FeedConfig;

pub struct FeedClient {
    client: Client,
    config: FeedConfig,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let client = Client::builder().user_agent(config.user_agent.clone()).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub async fn fetch_profile(&self) -> Result<Profile, FeedError> {
        let url = self.config.profile_url();
        debug!("fetching profile from {}", url);
        let response = self.client.get(url).send().await?;
        let body = read_body(response, "profile").await?;
        parse_profile(&body)
    }

    pub async fn fetch_repositories(&self) -> Result<Vec<Repository>, FeedError> {
        let url = self.config.repos_url();
        debug!("fetching repositories from {}", url);
        let response = self.client.get(url).send().await?;
        let body = read_body(response, "repositories").await?;
        parse_repositories(&body, self.config.max_repos)
    }

    /// Fetches profile and repositories concurrently. Any failure yields
    /// `FeedState::Failed`.
    pub async fn load(&self) -> FeedState {
        match tokio::try_join!(self.fetch_profile(), self.fetch_repositories()) {
            Ok((profile, repositories)) => {
                debug!("loaded {} repositories for {}", repositories.len(), profile.login);
                FeedState::Ready { profile, repositories }
            }
            Err(e) => {
                warn!("repository feed unavailable: {}", e);
                FeedState::Failed(e.to_string())
            }
        }
    }
}

async fn read_body(response: Response, resource: &'static str) -> Result<String, FeedError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            resource,
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}
