//! # Design
//!
//! - Structured, constant-message errors for disk inventory failures.
//! - Deletion failures are not errors at this level: the sweep resolves each
//!   orphan to a [`crate::sweep::SweepOutcome`] so one stubborn directory
//!   cannot abort a category.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for filesystem operations.
pub type FsOpsResult<T> = Result<T, FsOpsError>;

/// Errors produced by disk inventory.
#[derive(Debug, Error)]
pub enum FsOpsError {
    /// The expected directory is missing or is not a directory.
    #[error("not a directory")]
    NotADirectory {
        /// Path that failed the directory check.
        path: PathBuf,
    },
    /// IO failures while interacting with the filesystem.
    #[error("fsops io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl FsOpsError {
    pub(crate) fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
