//! Document filtering on kind, group/version, name and namespace

use crate::header::ManifestHeader;

const NAME_PREFIX: &str = "  name:";
const NAMESPACE_PREFIX: &str = "  namespace:";

/// `metadata.name` and `metadata.namespace` of one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFields {
    pub name: String,
    pub namespace: String,
}

impl MetadataFields {
    /// Only direct children of `metadata:` (exactly two spaces) are read.
    pub fn scan<S: AsRef<str>>(lines: &[S]) -> Self {
        lines
            .iter()
            .map(AsRef::as_ref)
            .fold(Self::default(), |mut fields, line| {
                if let Some(name) = line.strip_prefix(NAME_PREFIX) {
                    fields.name = name.trim().to_string();
                } else if let Some(namespace) = line.strip_prefix(NAMESPACE_PREFIX) {
                    fields.namespace = namespace.trim().to_string();
                }
                fields
            })
    }
}

/// Exact-match criteria; an empty criterion matches anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub kind: String,
    pub group_version: String,
    pub name: String,
    pub namespace: String,
}

impl FilterCriteria {
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[must_use]
    pub fn with_group_version(mut self, group_version: impl Into<String>) -> Self {
        self.group_version = group_version.into();
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// True when every non-empty criterion equals the document's value
    #[must_use]
    pub fn matches(&self, header: &ManifestHeader, fields: &MetadataFields) -> bool {
        [
            (&self.kind, &header.kind),
            (&self.group_version, &header.group_version),
            (&self.name, &fields.name),
            (&self.namespace, &fields.namespace),
        ]
        .into_iter()
        .all(|(wanted, actual)| wanted.is_empty() || wanted == actual)
    }
}
