//! Parsed version and classifier values and their ordering

use std::cmp::Ordering;
use std::fmt;

use crate::version::error::CompareError;
use crate::version::schema::Priority;

/// Pre-release / variant marker found inside a version, e.g. `-beta.2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    /// Marker plus suffix as it appeared in the raw string
    pub value: String,
    pub priority: Priority,
    /// Sub-components following the marker
    pub components: Vec<String>,
    /// Copied from the matching spec; ignored versions are never update candidates
    pub ignored: bool,
}

impl Classifier {
    /// Compares two classifiers.
    ///
    /// When either side has no sub-components the priorities decide. Otherwise the
    /// sub-components are compared pairwise as strings, and priority breaks a full tie.
    pub fn try_compare(&self, other: &Classifier) -> Result<Ordering, CompareError> {
        if self.components.is_empty() || other.components.is_empty() {
            return Ok(self.priority.cmp(&other.priority));
        }

        if self.components.len() != other.components.len() {
            return Err(CompareError::ClassifierSizeMismatch {
                left: self.components.len(),
                right: other.components.len(),
            });
        }

        let ordering = compare_components(&self.components, &other.components);
        Ok(ordering.then_with(|| self.priority.cmp(&other.priority)))
    }
}

/// A version parsed under a [`Schema`](crate::version::schema::Schema)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    raw: String,
    components: Vec<String>,
    classifier: Option<Classifier>,
}

impl Version {
    pub fn new(raw: &str, components: Vec<String>, classifier: Option<Classifier>) -> Self {
        Self {
            raw: raw.to_string(),
            components,
            classifier,
        }
    }

    /// Original string as fetched
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn classifier(&self) -> Option<&Classifier> {
        self.classifier.as_ref()
    }

    pub fn is_ignored(&self) -> bool {
        self.classifier.as_ref().is_some_and(|c| c.ignored)
    }

    /// Compares two versions.
    ///
    /// Components are compared pairwise as strings (`"10" < "9"`). When all components
    /// are equal, a version without classifier outranks one with a classifier.
    pub fn try_compare(&self, other: &Version) -> Result<Ordering, CompareError> {
        if self.components.len() != other.components.len() {
            return Err(CompareError::VersionSizeMismatch {
                left: self.components.len(),
                right: other.components.len(),
            });
        }

        let ordering = compare_components(&self.components, &other.components);
        if ordering != Ordering::Equal {
            return Ok(ordering);
        }

        match (&self.classifier, &other.classifier) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Greater),
            (Some(_), None) => Ok(Ordering::Less),
            (Some(a), Some(b)) => a.try_compare(b),
        }
    }

    pub fn is_newer_than(&self, other: &Version) -> Result<bool, CompareError> {
        Ok(self.try_compare(other)? == Ordering::Greater)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Compares two versions, returning a negative, zero or positive number
pub fn compare_versions(a: &Version, b: &Version) -> Result<i32, CompareError> {
    Ok(match a.try_compare(b)? {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    })
}

fn compare_components(a: &[String], b: &[String]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(left, right)| left.cmp(right))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
