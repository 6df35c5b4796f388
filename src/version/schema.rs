//! Version schema: how a raw version string is split into components and classifier
//!
//! A [`Schema`] is validated configuration. It can only be obtained through
//! [`Schema::new`], [`SchemaBuilder`] or deserialization, all of which reject
//! empty prefix and classifier lists.

use serde::Deserialize;
use tracing::warn;

use crate::version::error::SchemaError;

/// Default divider between classifier sub-components
pub const DEFAULT_COMPONENT_DIVIDER: &str = ".";

/// Default divider between version components
pub const DEFAULT_DIVIDER: &str = ".";

/// Signed rank of a classifier or an upstream. Higher means more stable / preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub i32);

impl Priority {
    pub const NONE: Priority = Priority(0);
    pub const MINIMAL: Priority = Priority(1);
    pub const LOW: Priority = Priority(2);
    pub const MIDDLE: Priority = Priority(3);
    pub const HIGH: Priority = Priority(4);
    pub const HIGHEST: Priority = Priority(5);

    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Priority(value)
    }
}

/// Describes one classifier (pre-release / variant tag) a version may carry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierSpec {
    /// Literal tag, e.g. `alpha`
    pub name: String,
    /// Text joining the tag to the version, e.g. `-`
    pub divider: String,
    /// Text separating the classifier's own sub-components
    #[serde(default = "default_component_divider")]
    pub component_divider: String,
    pub priority: Priority,
    /// Versions carrying this classifier are never update candidates
    #[serde(default)]
    pub ignore: bool,
    /// Release channel queried by channel-aware upstreams
    #[serde(default)]
    pub channel: Option<String>,
}

fn default_component_divider() -> String {
    DEFAULT_COMPONENT_DIVIDER.to_string()
}

impl ClassifierSpec {
    pub fn new(name: &str, divider: &str, priority: impl Into<Priority>) -> Self {
        Self {
            name: name.to_string(),
            divider: divider.to_string(),
            component_divider: default_component_divider(),
            priority: priority.into(),
            ignore: false,
            channel: None,
        }
    }

    pub fn builder() -> ClassifierSpecBuilder {
        ClassifierSpecBuilder::default()
    }

    /// The literal text that marks this classifier inside a version, e.g. `-beta`
    pub fn marker(&self) -> String {
        format!("{}{}", self.divider, self.name)
    }

    pub fn with_component_divider(mut self, component_divider: &str) -> Self {
        self.component_divider = component_divider.to_string();
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    pub fn with_channel(mut self, channel: &str) -> Self {
        self.channel = Some(channel.to_string());
        self
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptyClassifierName);
        }
        if self.component_divider.is_empty() {
            return Err(SchemaError::EmptyComponentDivider(self.name.clone()));
        }
        Ok(())
    }
}

/// Optional-field builder for [`ClassifierSpec`]
#[derive(Debug, Default)]
pub struct ClassifierSpecBuilder {
    name: Option<String>,
    divider: Option<String>,
    component_divider: Option<String>,
    priority: Option<Priority>,
    ignore: bool,
    channel: Option<String>,
}

impl ClassifierSpecBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn divider(mut self, divider: &str) -> Self {
        self.divider = Some(divider.to_string());
        self
    }

    pub fn component_divider(mut self, component_divider: &str) -> Self {
        self.component_divider = Some(component_divider.to_string());
        self
    }

    pub fn priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn channel(mut self, channel: &str) -> Self {
        self.channel = Some(channel.to_string());
        self
    }

    pub fn build(self) -> Result<ClassifierSpec, SchemaError> {
        let spec = ClassifierSpec {
            name: self.name.ok_or(SchemaError::MissingField("name"))?,
            divider: self.divider.ok_or(SchemaError::MissingField("divider"))?,
            component_divider: self
                .component_divider
                .unwrap_or_else(default_component_divider),
            priority: self.priority.ok_or(SchemaError::MissingField("priority"))?,
            ignore: self.ignore,
            channel: self.channel,
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// Parsing rules for the versions of one piece of software
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SchemaConfig")]
pub struct Schema {
    prefixes: Vec<String>,
    divider: String,
    classifiers: Vec<ClassifierSpec>,
}

/// Unvalidated wire form of a [`Schema`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaConfig {
    #[serde(default)]
    prefixes: Vec<String>,
    #[serde(default = "default_divider")]
    divider: String,
    #[serde(default)]
    classifiers: Vec<ClassifierSpec>,
}

fn default_divider() -> String {
    DEFAULT_DIVIDER.to_string()
}

impl TryFrom<SchemaConfig> for Schema {
    type Error = SchemaError;

    fn try_from(config: SchemaConfig) -> Result<Self, Self::Error> {
        Schema::new(config.prefixes, &config.divider, config.classifiers)
    }
}

impl Schema {
    pub fn new(
        prefixes: Vec<String>,
        divider: &str,
        classifiers: Vec<ClassifierSpec>,
    ) -> Result<Self, SchemaError> {
        if prefixes.is_empty() {
            return Err(SchemaError::EmptyPrefixes);
        }
        if classifiers.is_empty() {
            return Err(SchemaError::EmptyClassifiers);
        }
        if divider.is_empty() {
            return Err(SchemaError::EmptyDivider);
        }
        for classifier in &classifiers {
            classifier.validate()?;
        }

        warn_shadowed_markers(&classifiers);

        Ok(Self {
            prefixes,
            divider: divider.to_string(),
            classifiers,
        })
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn divider(&self) -> &str {
        &self.divider
    }

    pub fn classifiers(&self) -> &[ClassifierSpec] {
        &self.classifiers
    }

    /// Removes the longest declared prefix the value starts with.
    ///
    /// Returns the value unchanged when no prefix matches.
    pub fn remove_prefix<'a>(&self, value: &'a str) -> &'a str {
        self.prefixes
            .iter()
            .filter(|prefix| !prefix.is_empty() && value.starts_with(prefix.as_str()))
            .fold(None::<&String>, |longest, prefix| match longest {
                Some(current) if current.len() >= prefix.len() => Some(current),
                _ => Some(prefix),
            })
            .map_or(value, |prefix| &value[prefix.len()..])
    }
}

/// Classifiers are matched in declaration order, so a marker that contains an
/// earlier marker can never be selected.
fn warn_shadowed_markers(classifiers: &[ClassifierSpec]) {
    for (i, earlier) in classifiers.iter().enumerate() {
        let earlier_marker = earlier.marker();
        for later in &classifiers[i + 1..] {
            if later.marker().contains(&earlier_marker) {
                warn!(
                    "Classifier '{}' is shadowed by earlier classifier '{}'",
                    later.name, earlier.name
                );
            }
        }
    }
}

/// Optional-field builder for [`Schema`]
#[derive(Debug)]
pub struct SchemaBuilder {
    prefixes: Vec<String>,
    divider: String,
    classifiers: Vec<ClassifierSpec>,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self {
            prefixes: Vec::new(),
            divider: default_divider(),
            classifiers: Vec::new(),
        }
    }
}

impl SchemaBuilder {
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefixes.push(prefix.to_string());
        self
    }

    pub fn divider(mut self, divider: &str) -> Self {
        self.divider = divider.to_string();
        self
    }

    pub fn classifier(mut self, classifier: ClassifierSpec) -> Self {
        self.classifiers.push(classifier);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        Schema::new(self.prefixes, &self.divider, self.classifiers)
    }
}
