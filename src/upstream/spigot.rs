//! SpigotMC legacy update API upstream

use crate::upstream::http::check_status;
use crate::upstream::{Upstream, UpstreamKind, candidate};
use crate::version::error::UpstreamError;
use crate::version::schema::{Priority, Schema};
use crate::version::types::Version;

const DEFAULT_BASE_URL: &str = "https://api.spigotmc.org";

const DEFAULT_RELEASE_BASE_URL: &str = "https://www.spigotmc.org";

/// Upstream implementation for SpigotMC resources
///
/// The legacy endpoint answers with the bare version string as plain text.
pub struct SpigotUpstream {
    resource_id: String,
    priority: Priority,
    base_url: String,
}

impl SpigotUpstream {
    pub fn new(resource_id: &str) -> Self {
        Self {
            resource_id: resource_id.to_string(),
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
}

#[async_trait::async_trait]
impl Upstream for SpigotUpstream {
    fn kind(&self) -> UpstreamKind {
        UpstreamKind::Spigot
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        schema: &Schema,
    ) -> Result<Option<Version>, UpstreamError> {
        let url = format!(
            "{}/legacy/update.php?resource={}",
            self.base_url, self.resource_id
        );

        let response = client.get(&url).send().await?;
        let response = check_status(response, &self.resource_id)?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(UpstreamError::InvalidResponse(
                "empty version body".to_string(),
            ));
        }

        Ok(candidate(&body, schema, self.kind()))
    }

    fn release_url(&self, _version: &Version) -> String {
        format!(
            "{}/resources/{}/history",
            DEFAULT_RELEASE_BASE_URL, self.resource_id
        )
    }
}
