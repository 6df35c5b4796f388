use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Invalid schema: 'prefixes' cannot be empty")]
    EmptyPrefixes,

    #[error("Invalid schema: 'classifiers' cannot be empty")]
    EmptyClassifiers,

    #[error("Invalid schema: 'divider' cannot be empty")]
    EmptyDivider,

    #[error("Invalid schema: classifier name cannot be empty")]
    EmptyClassifierName,

    #[error("Invalid schema: component divider of classifier '{0}' cannot be empty")]
    EmptyComponentDivider(String),

    #[error("Invalid schema: missing required field '{0}'")]
    MissingField(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("Size of version components are not equal ({left} vs {right})")]
    VersionSizeMismatch { left: usize, right: usize },

    #[error("Size of classifier components are not equal ({left} vs {right})")]
    ClassifierSizeMismatch { left: usize, right: usize },
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Could not complete version request, returned {status}")]
    UnsuccessfulRequest { status: u16 },

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Classifier '{classifier}' does not declare a release channel")]
    ClassifierTypeMismatch { classifier: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: 'periodic' must be greater than zero")]
    ZeroPeriod,

    #[error("Invalid configuration: notification message cannot be empty")]
    EmptyNotification,

    #[error("Invalid configuration: '{field}' must be a whole number of milliseconds")]
    InvalidDuration { field: &'static str },

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum UpdaterError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not fetch version from upstream {upstream}")]
    UnsuccessfulVersionFetch { upstream: String },
}
