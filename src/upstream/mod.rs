//! Upstream release sources
//!
//! Each upstream issues one or more HTTP requests against a remote release API and
//! turns the payload into a [`Version`] using the caller's [`Schema`].

#[cfg(test)]
use mockall::automock;

use tracing::debug;

use crate::version::arbitrator::Update;
use crate::version::error::UpstreamError;
use crate::version::parser::parse_version;
use crate::version::schema::{Priority, Schema};
use crate::version::types::Version;

pub mod codeberg;
pub mod github;
pub mod hangar;
mod http;
pub mod modrinth;
pub mod spigot;

pub use codeberg::CodebergUpstream;
pub use github::GitHubUpstream;
pub use hangar::HangarUpstream;
pub use modrinth::{ModrinthProjectType, ModrinthUpstream};
pub use spigot::SpigotUpstream;

/// Type of upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamKind {
    /// GitHub Releases API
    GitHub,
    /// Codeberg (Gitea/Forgejo) Releases API
    Codeberg,
    /// SpigotMC legacy update API
    Spigot,
    /// PaperMC Hangar
    Hangar,
    /// Modrinth
    Modrinth,
}

impl UpstreamKind {
    /// Returns the string representation of the upstream kind
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamKind::GitHub => "github",
            UpstreamKind::Codeberg => "codeberg",
            UpstreamKind::Spigot => "spigot",
            UpstreamKind::Hangar => "hangar",
            UpstreamKind::Modrinth => "modrinth",
        }
    }
}

/// Trait for fetching the latest version from a remote release source
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Upstream: Send + Sync {
    /// Returns the kind of upstream this implementation handles
    fn kind(&self) -> UpstreamKind;

    /// Priority used to break ties between equal versions from different upstreams
    fn priority(&self) -> Priority;

    /// Fetches the latest version from the upstream
    ///
    /// # Returns
    /// * `Ok(Some(Version))` - The latest version
    /// * `Ok(None)` - No candidate version (nothing published, or the version is ignored)
    /// * `Err(UpstreamError)` - If the request fails or the payload is unreadable
    async fn fetch(
        &self,
        client: &reqwest::Client,
        schema: &Schema,
    ) -> Result<Option<Version>, UpstreamError>;

    /// Builds the release page URL for a version of this upstream
    fn release_url(&self, version: &Version) -> String;

    /// Builds the [`Update`] announced for a version of this upstream
    fn update(&self, version: &Version) -> Update {
        Update::new(version.raw(), &self.release_url(version))
    }
}

/// Parses a fetched value, dropping versions whose classifier is ignored
fn candidate(value: &str, schema: &Schema, kind: UpstreamKind) -> Option<Version> {
    let version = parse_version(value.trim(), schema);
    if version.is_ignored() {
        debug!("Ignoring version {} from {}", version, kind.as_str());
        return None;
    }
    Some(version)
}
