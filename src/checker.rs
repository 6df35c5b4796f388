//! Update checks against one or more upstreams

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::config::UpdaterConfig;
use crate::scheduler::{PeriodicTask, spawn_periodic};
use crate::upstream::Upstream;
use crate::version::arbitrator::{FetchedVersion, Update, select_best_update};
use crate::version::error::UpdaterError;
use crate::version::parser::parse_version;
use crate::version::schema::Schema;

/// Compares the running version against versions fetched from upstreams
pub struct Updater {
    config: UpdaterConfig,
    client: reqwest::Client,
}

impl Updater {
    pub fn new(config: UpdaterConfig) -> Result<Self, UpdaterError> {
        config.validate()?;
        let client = config
            .build_client()
            .map_err(|e| UpdaterError::Upstream(e.into()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Checks a single upstream.
    ///
    /// Returns the update when the fetched version is strictly newer than `current`.
    pub async fn check(
        &self,
        current: &str,
        schema: &Schema,
        upstream: &dyn Upstream,
    ) -> Result<Option<Update>, UpdaterError> {
        let current = parse_version(current, schema);
        let kind = upstream.kind().as_str();

        let Some(fetched) = upstream.fetch(&self.client, schema).await? else {
            if self.config.fail_on_missing_version {
                return Err(UpdaterError::UnsuccessfulVersionFetch {
                    upstream: kind.to_string(),
                });
            }
            info!("No version available from {}", kind);
            return Ok(None);
        };

        if !fetched.is_newer_than(&current)? {
            debug!("{} is up to date ({} from {})", current, fetched, kind);
            return Ok(None);
        }

        let update = upstream.update(&fetched);
        self.notify(&update);
        Ok(Some(update))
    }

    /// Checks several upstreams concurrently and selects the best update.
    ///
    /// Upstreams that fail or yield nothing are logged and skipped. Comparison errors
    /// are returned.
    pub async fn check_all(
        &self,
        current: &str,
        schema: &Schema,
        upstreams: &[Arc<dyn Upstream>],
    ) -> Result<Option<Update>, UpdaterError> {
        let current = parse_version(current, schema);

        let futures = upstreams.iter().map(|upstream| async move {
            let kind = upstream.kind().as_str();
            match upstream.fetch(&self.client, schema).await {
                Ok(Some(version)) => {
                    info!("Fetched {} from {}", version, kind);
                    Some(FetchedVersion {
                        url: upstream.release_url(&version),
                        upstream_priority: upstream.priority(),
                        version,
                    })
                }
                Ok(None) => {
                    info!("No version available from {}", kind);
                    None
                }
                Err(e) => {
                    error!("Failed to fetch version from {}: {}", kind, e);
                    None
                }
            }
        });

        let fetched: Vec<FetchedVersion> = join_all(futures).await.into_iter().flatten().collect();

        let update = select_best_update(&current, &fetched)?;
        if let Some(update) = &update {
            self.notify(update);
        }
        Ok(update)
    }

    /// Logs the configured notification for an update
    pub fn notify(&self, update: &Update) {
        if self.config.notification.notify {
            warn!("{}", update.render(&self.config.notification.message));
        }
    }

    /// Checks one upstream once, or spawns a periodic check when `periodic` is configured.
    ///
    /// In periodic mode the first check runs immediately; failing checks are logged
    /// and the loop continues.
    pub async fn run(
        self: Arc<Self>,
        current: String,
        schema: Schema,
        upstream: Arc<dyn Upstream>,
    ) -> Result<Option<PeriodicTask>, UpdaterError> {
        let Some(period) = self.config.period() else {
            self.check(&current, &schema, upstream.as_ref()).await?;
            return Ok(None);
        };

        info!(
            "Checking {} for updates every {:?}",
            upstream.kind().as_str(),
            period
        );
        let current = Arc::new(current);
        let schema = Arc::new(schema);

        let task = spawn_periodic(period, move || {
            let updater = self.clone();
            let current = current.clone();
            let schema = schema.clone();
            let upstream = upstream.clone();
            async move {
                if let Err(e) = updater.check(&current, &schema, upstream.as_ref()).await {
                    error!("Periodic update check failed: {}", e);
                }
            }
        });

        Ok(Some(task))
    }

    /// Same as [`Updater::run`] over several upstreams, using [`Updater::check_all`]
    pub async fn run_all(
        self: Arc<Self>,
        current: String,
        schema: Schema,
        upstreams: Vec<Arc<dyn Upstream>>,
    ) -> Result<Option<PeriodicTask>, UpdaterError> {
        let Some(period) = self.config.period() else {
            self.check_all(&current, &schema, &upstreams).await?;
            return Ok(None);
        };

        info!(
            "Checking {} upstreams for updates every {:?}",
            upstreams.len(),
            period
        );
        let current = Arc::new(current);
        let schema = Arc::new(schema);
        let upstreams = Arc::new(upstreams);

        let task = spawn_periodic(period, move || {
            let updater = self.clone();
            let current = current.clone();
            let schema = schema.clone();
            let upstreams = upstreams.clone();
            async move {
                if let Err(e) = updater.check_all(&current, &schema, &upstreams).await {
                    error!("Periodic update check failed: {}", e);
                }
            }
        });

        Ok(Some(task))
    }
}
