//! Manifest-annotator-core - line-oriented annotation merging
//!
//! This crate provides:
//! - Document splitting and in-place rewriting of multi-document YAML files
//! - `kind` / `apiVersion` / `metadata.name` / `metadata.namespace` filtering
//! - Merging of a single annotation into `metadata.annotations`
//!
//! Nothing here parses YAML. Structure is recognized by line prefixes and
//! indentation only, so comments, blank lines and key order outside the
//! touched annotation block survive byte for byte.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod annotations;
pub mod document;
pub mod error;
pub mod filter;
pub mod header;
pub mod metadata;
pub mod options;
pub mod output;

pub use annotations::{AnnotationBlock, AnnotationEntry};
pub use document::{
    annotate_file, annotate_text, read_manifest, write_manifest, AnnotateReport, Annotated,
};
pub use error::{Error, Result};
pub use filter::{FilterCriteria, MetadataFields};
pub use header::ManifestHeader;
pub use options::{AnnotationTarget, AnnotatorOptions, MergePolicy, Outcome};
pub use output::Output;
