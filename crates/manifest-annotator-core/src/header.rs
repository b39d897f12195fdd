//! Manifest header scanning (`kind`, `apiVersion`)

const KIND_PREFIX: &str = "kind:";
const API_VERSION_PREFIX: &str = "apiVersion:";

/// Top-level identity of one manifest document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestHeader {
    pub kind: String,
    pub group_version: String,
}

impl ManifestHeader {
    /// Scan unindented `kind:` and `apiVersion:` lines. The last occurrence
    /// of each wins; missing keys stay empty.
    pub fn scan<S: AsRef<str>>(lines: &[S]) -> Self {
        lines
            .iter()
            .map(AsRef::as_ref)
            .fold(Self::default(), |mut header, line| {
                if let Some(kind) = line.strip_prefix(KIND_PREFIX) {
                    header.kind = kind.trim().to_string();
                } else if let Some(gv) = line.strip_prefix(API_VERSION_PREFIX) {
                    header.group_version = gv.trim().to_string();
                }
                header
            })
    }
}
