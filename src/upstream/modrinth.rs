//! Modrinth upstream

use serde::Deserialize;
use tracing::info;

use crate::upstream::http::{check_status, json};
use crate::upstream::{Upstream, UpstreamKind, candidate};
use crate::version::error::UpstreamError;
use crate::version::schema::{Priority, Schema};
use crate::version::types::Version;

const DEFAULT_BASE_URL: &str = "https://api.modrinth.com";

const DEFAULT_RELEASE_BASE_URL: &str = "https://modrinth.com";

/// Kind of Modrinth project, used in release page URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModrinthProjectType {
    Mod,
    ResourcePack,
    DataPack,
    Shader,
    ModPack,
    Plugin,
}

impl ModrinthProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModrinthProjectType::Mod => "mod",
            ModrinthProjectType::ResourcePack => "resourcepack",
            ModrinthProjectType::DataPack => "datapack",
            ModrinthProjectType::Shader => "shader",
            ModrinthProjectType::ModPack => "modpack",
            ModrinthProjectType::Plugin => "plugin",
        }
    }
}

/// Entry of the project version list (newest first)
#[derive(Debug, Deserialize)]
struct ProjectVersion {
    version_number: String,
}

/// Upstream implementation for Modrinth projects
pub struct ModrinthUpstream {
    project_id: String,
    project_type: ModrinthProjectType,
    priority: Priority,
    base_url: String,
}

impl ModrinthUpstream {
    pub fn new(project_id: &str, project_type: ModrinthProjectType) -> Self {
        Self {
            project_id: project_id.to_string(),
            project_type,
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
impl Upstream for ModrinthUpstream {
    fn kind(&self) -> UpstreamKind {
        UpstreamKind::Modrinth
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        schema: &Schema,
    ) -> Result<Option<Version>, UpstreamError> {
        let url = format!("{}/v2/project/{}/version", self.base_url, self.project_id);

        let response = client.get(&url).send().await?;
        let response = check_status(response, &self.project_id)?;

        let versions: Vec<ProjectVersion> = json(response).await?;

        let Some(latest) = versions.first() else {
            info!("No versions published for {}", self.project_id);
            return Ok(None);
        };

        Ok(candidate(&latest.version_number, schema, self.kind()))
    }

    fn release_url(&self, version: &Version) -> String {
        format!(
            "{}/{}/{}/version/{}",
            DEFAULT_RELEASE_BASE_URL,
            self.project_type.as_str(),
            self.project_id,
            version.raw()
        )
    }
}
