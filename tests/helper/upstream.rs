//! Upstream test utilities

use async_trait::async_trait;

use upstream_updater::version::error::UpstreamError;
use upstream_updater::version::parser::parse_version;
use upstream_updater::{Priority, Schema, Upstream, UpstreamKind, Version};

/// Upstream answering with a fixed version and no network access
pub struct StaticUpstream {
    kind: UpstreamKind,
    priority: Priority,
    version: Option<String>,
    fail: bool,
}

impl StaticUpstream {
    pub fn new(kind: UpstreamKind) -> Self {
        Self {
            kind,
            priority: Priority::NONE,
            version: None,
            fail: false,
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Priority(priority);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl Upstream for StaticUpstream {
    fn kind(&self) -> UpstreamKind {
        self.kind
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    async fn fetch(
        &self,
        _client: &reqwest::Client,
        schema: &Schema,
    ) -> Result<Option<Version>, UpstreamError> {
        if self.fail {
            return Err(UpstreamError::UnsuccessfulRequest { status: 500 });
        }
        Ok(self
            .version
            .as_deref()
            .map(|raw| parse_version(raw, schema))
            .filter(|version| !version.is_ignored()))
    }

    fn release_url(&self, version: &Version) -> String {
        format!("https://{}.example/{}", self.kind.as_str(), version.raw())
    }
}
