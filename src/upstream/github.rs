//! GitHub Releases API upstream

use serde::Deserialize;
use tracing::info;

use crate::upstream::http::{check_status, json};
use crate::upstream::{Upstream, UpstreamKind, candidate};
use crate::version::error::UpstreamError;
use crate::version::schema::{Priority, Schema};
use crate::version::types::Version;

/// Default base URL for GitHub API
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default base URL for release pages
const DEFAULT_RELEASE_BASE_URL: &str = "https://github.com";

/// Response from GitHub Releases API
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Upstream implementation for GitHub Releases API
pub struct GitHubUpstream {
    user: String,
    repo: String,
    priority: Priority,
    base_url: String,
}

impl GitHubUpstream {
    pub fn new(user: &str, repo: &str) -> Self {
        Self {
            user: user.to_string(),
            repo: repo.to_string(),
            priority: Priority::NONE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = priority.into();
        self
    }

    fn project(&self) -> String {
        format!("{}/{}", self.user, self.repo)
    }
}

#[async_trait::async_trait]
impl Upstream for GitHubUpstream {
    fn kind(&self) -> UpstreamKind {
        UpstreamKind::GitHub
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        schema: &Schema,
    ) -> Result<Option<Version>, UpstreamError> {
        let project = self.project();
        let url = format!("{}/repos/{}/releases", self.base_url, project);

        let response = client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;
        let response = check_status(response, &project)?;

        let releases: Vec<Release> = json(response).await?;

        let Some(latest) = releases.first() else {
            info!("No releases published for {}", project);
            return Ok(None);
        };

        Ok(candidate(&latest.tag_name, schema, self.kind()))
    }

    fn release_url(&self, version: &Version) -> String {
        format!(
            "{}/{}/releases/tag/{}",
            DEFAULT_RELEASE_BASE_URL,
            self.project(),
            version.raw()
        )
    }
}
