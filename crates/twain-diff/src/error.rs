//! Error types for the diff engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The error type for twain operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// The requested file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// Reading a file failed for a reason other than it being missing.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The diff program could not be started, died, or exited abnormally.
    #[error("diff program `{program}` failed: {reason}")]
    ExternalProcess {
        /// Program name as configured.
        program: String,
        /// Human-readable cause.
        reason: String,
    },

    /// The unified diff stream could not be read.
    #[error("failed to read diff stream: {0}")]
    Stream(#[source] io::Error),
}

impl Error {
    pub(crate) fn from_read(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound { path }
        } else {
            Error::Io { path, source }
        }
    }

    pub(crate) fn external(program: &str, reason: impl Into<String>) -> Self {
        Error::ExternalProcess {
            program: program.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias for twain operations.
pub type Result<T> = std::result::Result<T, Error>;
