//! Manifest-annotator - add/update annotations in yaml manifest files
//!
//! Updates a file without changing its structure or removing comments.
//! Files with multiple manifests are supported.

pub mod cli;
pub mod commands;
