//! PaperMC Hangar upstream
//!
//! Hangar publishes one latest version per release channel. Every classifier of the
//! schema must name the channel it stands for; the channel versions are then reduced
//! to one by classifier priority.

use reqwest::StatusCode;
use tracing::debug;

use crate::upstream::http::check_status;
use crate::upstream::{Upstream, UpstreamKind, candidate};
use crate::version::arbitrator::prioritize_channel_versions;
use crate::version::error::UpstreamError;
use crate::version::schema::{ClassifierSpec, Priority, Schema};
use crate::version::types::Version;

const DEFAULT_BASE_URL: &str = "https://hangar.papermc.io";

/// Upstream implementation for Hangar projects
pub struct HangarUpstream {
    project_id: String,
    priority: Priority,
    base_url: String,
}

impl HangarUpstream {
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            priority: Priority::NONE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Fetches the latest version of one channel, `None` when the channel is unknown
    async fn fetch_channel(
        &self,
        client: &reqwest::Client,
        channel: &str,
    ) -> Result<Option<String>, UpstreamError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/api/v1/projects/{}/latest", self.base_url, self.project_id),
            &[("channel", channel)],
        )
        .map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;

        let response = client.get(url).send().await?;
        if response.status() == StatusCode::BAD_REQUEST {
            debug!(
                "Hangar has no version in channel {} for {}",
                channel, self.project_id
            );
            return Ok(None);
        }
        let response = check_status(response, &self.project_id)?;

        let body = response.text().await?;
        let body = body.trim();
        Ok((!body.is_empty()).then(|| body.to_string()))
    }
}

#[async_trait::async_trait]
impl Upstream for HangarUpstream {
    fn kind(&self) -> UpstreamKind {
        UpstreamKind::Hangar
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        schema: &Schema,
    ) -> Result<Option<Version>, UpstreamError> {
        let mut channel_versions: Vec<(String, ClassifierSpec)> = Vec::new();

        for spec in schema.classifiers() {
            let Some(channel) = spec.channel.as_deref() else {
                return Err(UpstreamError::ClassifierTypeMismatch {
                    classifier: spec.name.clone(),
                });
            };

            if spec.ignore {
                debug!("Skipping ignored channel {} for {}", channel, self.project_id);
                continue;
            }

            if let Some(value) = self.fetch_channel(client, channel).await? {
                channel_versions.push((value, spec.clone()));
            }
        }

        let Some(value) = prioritize_channel_versions(&channel_versions) else {
            return Ok(None);
        };

        Ok(candidate(value, schema, self.kind()))
    }

    fn release_url(&self, version: &Version) -> String {
        format!(
            "{}/{}/versions/{}",
            DEFAULT_BASE_URL,
            self.project_id,
            version.raw()
        )
    }
}
