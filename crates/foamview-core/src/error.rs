//! Error types for the foamview system.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! This ensures composable error handling across crates.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all foamview operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Note not found in the workspace
    #[error("Note not found: {name}")]
    NoteNotFound { name: String },

    /// Invalid file path (outside workspace, not a note, etc.)
    #[error("Invalid file path: {reason}")]
    InvalidPath { reason: String },

    /// File too large for indexing
    #[error("File too large ({size} bytes, max {max} bytes): {path}")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Resource lookup failure inside the workspace index
    #[error("Index error: {reason}")]
    IndexError { reason: String },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a note not found error
    pub fn note_not_found(name: impl Into<String>) -> Self {
        Error::NoteNotFound { name: name.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a file too large error
    pub fn file_too_large(path: impl Into<PathBuf>, size: u64, max: u64) -> Self {
        Error::FileTooLarge {
            path: path.into(),
            size,
            max,
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create an index error
    pub fn index_error(reason: impl Into<String>) -> Self {
        Error::IndexError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::note_not_found("inbox");
        assert!(err.to_string().contains("Note not found"));

        let err = Error::config_error("workspace root does not exist");
        assert!(err.to_string().contains("Configuration error"));

        let err = Error::file_too_large("/notes/huge.md", 20, 10);
        assert!(err.to_string().contains("File too large"));
    }
}
