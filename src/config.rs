use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::upstream::{
    CodebergUpstream, GitHubUpstream, HangarUpstream, ModrinthProjectType, ModrinthUpstream,
    SpigotUpstream, Upstream,
};
use crate::version::error::ConfigError;
use crate::version::schema::{Priority, Schema};

// =============================================================================
// Defaults
// =============================================================================

/// Default HTTP read timeout in milliseconds (30 seconds)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 30_000;

/// Default HTTP connect timeout in milliseconds (30 seconds)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 30_000;

/// Message logged when an update is found
pub const DEFAULT_NOTIFICATION: &str =
    "New update has been found. Version {version} can be downloaded from {url}";

const APP_NAME: &str = "upstream-updater";

/// Updater configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdaterConfig {
    /// Milliseconds between periodic checks, `None` for a single check
    pub periodic: Option<u64>,
    /// HTTP read timeout in milliseconds
    pub read_timeout: u64,
    /// HTTP connect timeout in milliseconds
    pub connect_timeout: u64,
    pub user_agent: String,
    /// Fail a single-upstream check when the upstream yields no version
    pub fail_on_missing_version: bool,
    pub notification: NotificationConfig,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            periodic: None,
            read_timeout: DEFAULT_READ_TIMEOUT_MS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_MS,
            user_agent: format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")),
            fail_on_missing_version: false,
            notification: NotificationConfig::default(),
        }
    }
}

/// Update notification settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationConfig {
    pub notify: bool,
    /// Template with `{version}` and `{url}` placeholders
    pub message: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            notify: true,
            message: DEFAULT_NOTIFICATION.to_string(),
        }
    }
}

impl UpdaterConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.periodic == Some(0) {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.notification.notify && self.notification.message.trim().is_empty() {
            return Err(ConfigError::EmptyNotification);
        }
        Ok(())
    }

    pub fn period(&self) -> Option<Duration> {
        self.periodic.map(Duration::from_millis)
    }

    /// Creates the HTTP client shared by all upstreams
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .read_timeout(Duration::from_millis(self.read_timeout))
            .connect_timeout(Duration::from_millis(self.connect_timeout))
            .build()
    }
}

/// Builder for [`UpdaterConfig`], validated on [`ConfigBuilder::build`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: UpdaterConfig,
    periodic: Option<Duration>,
    read_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ConfigBuilder {
    pub fn periodic(mut self, period: Duration) -> Self {
        self.periodic = Some(period);
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.config.user_agent = user_agent.to_string();
        self
    }

    pub fn fail_on_missing_version(mut self, fail: bool) -> Self {
        self.config.fail_on_missing_version = fail;
        self
    }

    pub fn notification(mut self, notify: bool, message: &str) -> Self {
        self.config.notification = NotificationConfig {
            notify,
            message: message.to_string(),
        };
        self
    }

    pub fn build(mut self) -> Result<UpdaterConfig, ConfigError> {
        if let Some(period) = self.periodic {
            self.config.periodic = Some(whole_millis("periodic", period)?);
        }
        if let Some(timeout) = self.read_timeout {
            self.config.read_timeout = whole_millis("readTimeout", timeout)?;
        }
        if let Some(timeout) = self.connect_timeout {
            self.config.connect_timeout = whole_millis("connectTimeout", timeout)?;
        }
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Converts a duration to milliseconds, rejecting sub-millisecond precision and overflow
fn whole_millis(field: &'static str, duration: Duration) -> Result<u64, ConfigError> {
    if duration.subsec_nanos() % 1_000_000 != 0 {
        return Err(ConfigError::InvalidDuration { field });
    }
    u64::try_from(duration.as_millis()).map_err(|_| ConfigError::InvalidDuration { field })
}

/// One upstream entry of a check file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum UpstreamConfig {
    GitHub {
        user: String,
        repo: String,
        #[serde(default)]
        priority: Priority,
        base_url: Option<String>,
    },
    Codeberg {
        user: String,
        repo: String,
        #[serde(default = "codeberg_priority")]
        priority: Priority,
        base_url: Option<String>,
        release_template: Option<String>,
    },
    Spigot {
        resource_id: String,
        #[serde(default)]
        priority: Priority,
    },
    Hangar {
        project_id: String,
        #[serde(default)]
        priority: Priority,
    },
    Modrinth {
        project_id: String,
        project_type: ModrinthProjectType,
        #[serde(default)]
        priority: Priority,
    },
}

fn codeberg_priority() -> Priority {
    Priority::MINIMAL
}

impl UpstreamConfig {
    pub fn build(&self) -> Arc<dyn Upstream> {
        match self {
            UpstreamConfig::GitHub {
                user,
                repo,
                priority,
                base_url,
            } => {
                let mut upstream = GitHubUpstream::new(user, repo).with_priority(*priority);
                if let Some(url) = base_url {
                    upstream = upstream.with_base_url(url);
                }
                Arc::new(upstream)
            }
            UpstreamConfig::Codeberg {
                user,
                repo,
                priority,
                base_url,
                release_template,
            } => {
                let mut upstream = CodebergUpstream::new(user, repo).with_priority(*priority);
                if let Some(url) = base_url {
                    upstream = upstream.with_base_url(url);
                }
                if let Some(template) = release_template {
                    upstream = upstream.with_release_template(template);
                }
                Arc::new(upstream)
            }
            UpstreamConfig::Spigot {
                resource_id,
                priority,
            } => Arc::new(SpigotUpstream::new(resource_id).with_priority(*priority)),
            UpstreamConfig::Hangar {
                project_id,
                priority,
            } => Arc::new(HangarUpstream::new(project_id).with_priority(*priority)),
            UpstreamConfig::Modrinth {
                project_id,
                project_type,
                priority,
            } => Arc::new(ModrinthUpstream::new(project_id, *project_type).with_priority(*priority)),
        }
    }
}

/// Everything a check needs, as read from a JSON file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckFile {
    /// The version currently running
    pub current: String,
    pub schema: Schema,
    pub upstreams: Vec<UpstreamConfig>,
    #[serde(default)]
    pub updater: UpdaterConfig,
}

impl CheckFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let file: CheckFile = serde_json::from_str(&contents)?;
        file.updater.validate()?;
        Ok(file)
    }
}

/// Returns the path to the data directory for upstream-updater.
/// Uses $XDG_DATA_HOME/upstream-updater if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/upstream-updater,
/// or ./upstream-updater if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(format!("{}.log", APP_NAME))
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_NAME)
}
