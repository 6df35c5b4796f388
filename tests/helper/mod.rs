//! Shared test utilities

#![allow(dead_code)]

pub mod upstream;

pub use upstream::StaticUpstream;

use upstream_updater::{ClassifierSpec, Priority, Schema};

/// Schema with a `v` prefix and the usual pre-release classifiers
pub fn release_schema() -> Schema {
    Schema::builder()
        .prefix("v")
        .classifier(ClassifierSpec::new("rc", "-", Priority::HIGHEST))
        .classifier(ClassifierSpec::new("beta", "-", Priority::HIGH))
        .classifier(ClassifierSpec::new("alpha", "-", Priority::MIDDLE))
        .classifier(ClassifierSpec::new("nightly", "-", Priority::NONE).ignored())
        .build()
        .unwrap()
}
