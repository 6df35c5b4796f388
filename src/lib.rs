//! Checks remote release sources for versions newer than the one running.
//!
//! A [`Schema`] describes how version strings look (prefixes, component divider,
//! pre-release classifiers). Each [`Upstream`] fetches its latest version, the
//! [`Updater`] compares it against the current one and announces the best update.

pub mod checker;
pub mod config;
pub mod logging;
pub mod scheduler;
pub mod upstream;
pub mod version;

pub use checker::Updater;
pub use config::{CheckFile, UpdaterConfig, UpstreamConfig};
pub use scheduler::{PeriodicTask, spawn_periodic};
pub use upstream::{Upstream, UpstreamKind};
pub use version::arbitrator::Update;
pub use version::schema::{ClassifierSpec, Priority, Schema};
pub use version::types::Version;
