//! Annotation target, merge policy and per-run options

use strum::{Display, EnumString};

use crate::{filter::FilterCriteria, Error, Result};

/// Whether processing changed the text it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Output is byte-identical to input
    #[default]
    Unchanged,
    /// Output differs from input
    Changed,
}

impl Outcome {
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// What to do when the target annotation is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MergePolicy {
    /// Leave the existing value alone
    #[default]
    Keep,
    /// Rewrite the existing entry in place when its value differs
    Overwrite,
}

/// The annotation to ensure, plus an optional sentinel that suppresses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationTarget {
    key: String,
    value: String,
    skip_key: Option<String>,
}

impl AnnotationTarget {
    /// Create a target, rejecting keys that cannot be written as
    /// `    key: value` without breaking the block.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self {
            key,
            value: value.into(),
            skip_key: None,
        })
    }

    /// Set the sentinel annotation. An empty key disables the check.
    #[must_use]
    pub fn with_skip_key(mut self, skip_key: impl Into<String>) -> Self {
        let skip_key = skip_key.into();
        self.skip_key = (!skip_key.trim().is_empty()).then(|| skip_key.trim().to_string());
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn skip_key(&self) -> Option<&str> {
        self.skip_key.as_deref()
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::InvalidTarget("annotation key cannot be empty".into()));
    }
    if key.starts_with(char::is_whitespace) || key.ends_with(char::is_whitespace) {
        return Err(Error::InvalidTarget(format!(
            "annotation key '{key}' has surrounding whitespace"
        )));
    }
    if key.contains(':') {
        return Err(Error::InvalidTarget(format!(
            "annotation key '{key}' cannot contain ':'"
        )));
    }
    if key.contains(['\n', '\r']) {
        return Err(Error::InvalidTarget(
            "annotation key cannot contain a line break".into(),
        ));
    }
    Ok(())
}

/// Everything one annotation run needs
#[derive(Debug, Clone)]
pub struct AnnotatorOptions {
    pub target: AnnotationTarget,
    pub filter: FilterCriteria,
    pub policy: MergePolicy,
}

impl AnnotatorOptions {
    #[must_use]
    pub fn new(target: AnnotationTarget) -> Self {
        Self {
            target,
            filter: FilterCriteria::default(),
            policy: MergePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FilterCriteria) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }
}
