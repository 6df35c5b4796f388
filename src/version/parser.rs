//! Turns raw version strings into [`Version`] values

use tracing::debug;

use crate::version::schema::{ClassifierSpec, Schema};
use crate::version::types::{Classifier, Version};

/// Parses a raw version string under the given schema.
///
/// The longest matching prefix is removed first. The first classifier spec (in
/// declaration order) whose marker occurs in the remainder splits it into version
/// components and classifier; without a match the whole remainder is split into
/// components.
pub fn parse_version(raw: &str, schema: &Schema) -> Version {
    let stripped = schema.remove_prefix(raw);

    let matched = schema.classifiers().iter().find_map(|spec| {
        let marker = spec.marker();
        stripped.find(&marker).map(|position| (spec, position, marker))
    });

    let Some((spec, position, marker)) = matched else {
        return Version::new(raw, split(stripped, schema.divider()), None);
    };

    let classifier = classifier(spec, &stripped[position..], &marker);
    debug!(
        "Parsed {} with classifier {} (priority {})",
        raw,
        classifier.value,
        classifier.priority.value()
    );

    Version::new(
        raw,
        split(&stripped[..position], schema.divider()),
        Some(classifier),
    )
}

/// Builds the classifier from the text starting at its marker
fn classifier(spec: &ClassifierSpec, value: &str, marker: &str) -> Classifier {
    let suffix = &value[marker.len()..];
    let suffix = suffix
        .strip_prefix(spec.component_divider.as_str())
        .unwrap_or(suffix);

    let components = if suffix.is_empty() {
        Vec::new()
    } else {
        split(suffix, &spec.component_divider)
    };

    Classifier {
        value: value.to_string(),
        priority: spec.priority,
        components,
        ignored: spec.ignore,
    }
}

fn split(value: &str, divider: &str) -> Vec<String> {
    value.split(divider).map(str::to_string).collect()
}
