//! Codeberg (Forgejo) Releases API upstream
//!
//! Works with any Forgejo or Gitea instance by overriding the base URL and the
//! release URL template.

use serde::Deserialize;

use crate::upstream::http::{check_status, json};
use crate::upstream::{Upstream, UpstreamKind, candidate};
use crate::version::error::UpstreamError;
use crate::version::schema::{Priority, Schema};
use crate::version::types::Version;

/// Default base URL for Codeberg API
const DEFAULT_BASE_URL: &str = "https://codeberg.org/api/v1";

/// Default base URL for release pages
const DEFAULT_RELEASE_BASE_URL: &str = "https://codeberg.org";

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Upstream implementation for Codeberg Releases API
pub struct CodebergUpstream {
    user: String,
    repo: String,
    priority: Priority,
    base_url: String,
    /// Release page URL; `{version}` is replaced with the version
    release_template: String,
}

impl CodebergUpstream {
    pub fn new(user: &str, repo: &str) -> Self {
        Self {
            user: user.to_string(),
            repo: repo.to_string(),
            priority: Priority::MINIMAL,
            base_url: DEFAULT_BASE_URL.to_string(),
            release_template: format!(
                "{}/{}/{}/releases/tag/{{version}}",
                DEFAULT_RELEASE_BASE_URL, user, repo
            ),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_release_template(mut self, release_template: &str) -> Self {
        self.release_template = release_template.to_string();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = priority.into();
        self
    }
}

#[async_trait::async_trait]
impl Upstream for CodebergUpstream {
    fn kind(&self) -> UpstreamKind {
        UpstreamKind::Codeberg
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        schema: &Schema,
    ) -> Result<Option<Version>, UpstreamError> {
        let project = format!("{}/{}", self.user, self.repo);
        let url = format!("{}/repos/{}/releases/latest", self.base_url, project);

        let response = client.get(&url).send().await?;
        let response = check_status(response, &project)?;

        let release: Release = json(response).await?;

        Ok(candidate(&release.tag_name, schema, self.kind()))
    }

    fn release_url(&self, version: &Version) -> String {
        self.release_template.replace("{version}", version.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::parser::parse_version;
    use crate::version::schema::ClassifierSpec;
    use mockito::Server;

    fn schema() -> Schema {
        Schema::builder()
            .prefix("v")
            .classifier(ClassifierSpec::new("rc", "-", Priority::HIGHEST))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_latest_release() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/forge/app/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 12, "tag_name": "v2.0.0-rc.3", "name": "2.0 RC3"}"#)
            .create_async()
            .await;

        let upstream = CodebergUpstream::new("forge", "app").with_base_url(&server.url());
        let version = upstream
            .fetch(&reqwest::Client::new(), &schema())
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(version.raw(), "v2.0.0-rc.3");
        assert_eq!(version.classifier().unwrap().priority, Priority::HIGHEST);
    }

    #[tokio::test]
    async fn fetch_returns_unsuccessful_request_for_server_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/forge/app/releases/latest")
            .with_status(500)
            .create_async()
            .await;

        let upstream = CodebergUpstream::new("forge", "app").with_base_url(&server.url());
        let result = upstream.fetch(&reqwest::Client::new(), &schema()).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(UpstreamError::UnsuccessfulRequest { status: 500 })
        ));
    }

    #[test]
    fn release_url_uses_default_template() {
        let upstream = CodebergUpstream::new("forge", "app");
        let version = parse_version("v2.0.0", &schema());

        assert_eq!(
            upstream.release_url(&version),
            "https://codeberg.org/forge/app/releases/tag/v2.0.0"
        );
        assert_eq!(upstream.priority(), Priority::MINIMAL);
    }

    #[test]
    fn release_url_uses_custom_template() {
        let upstream = CodebergUpstream::new("forge", "app")
            .with_release_template("https://git.example.org/forge/app/tags/{version}");
        let version = parse_version("v2.0.0", &schema());

        assert_eq!(
            upstream.release_url(&version),
            "https://git.example.org/forge/app/tags/v2.0.0"
        );
    }
}
