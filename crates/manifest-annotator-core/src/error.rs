//! Error types for manifest-annotator-core

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for annotation operations
#[derive(Debug, Error)]
pub enum Error {
    /// The manifest file could not be opened or read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rewritten manifest could not be written back
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The annotation key cannot be written as a block mapping key
    #[error("invalid annotation: {0}")]
    InvalidTarget(String),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// - 1: bad input (annotation key)
    /// - 2: I/O failure
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidTarget(_) => 1,
            Self::Read { .. } | Self::Write { .. } => 2,
        }
    }
}

/// Result type alias for manifest-annotator-core operations
pub type Result<T> = std::result::Result<T, Error>;
