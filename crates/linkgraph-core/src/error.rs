//! Error types for the linkgraph system.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! Only [`Error::CorpusRoot`] is fatal to a scan; every per-document or
//! per-reference failure is recorded and the scan moves on.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all linkgraph operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The corpus root is missing, unreadable or not a directory
    #[error("Cannot scan corpus root {path}: {reason}")]
    CorpusRoot { path: PathBuf, reason: String },

    /// A reference target could not be turned into an absolute path
    #[error("Cannot resolve '{target}': {reason}")]
    Resolution { target: String, reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Output serialization failure
    #[error("Failed to serialize {context}: {reason}")]
    Serialization { context: String, reason: String },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a corpus root error
    pub fn corpus_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::CorpusRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a resolution error
    pub fn resolution(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Resolution {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Serialization {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts a whole scan
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::CorpusRoot { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::corpus_root("/no/such/dir", "not found");
        assert!(err.to_string().contains("Cannot scan corpus root"));
        assert!(err.is_fatal());

        let err = Error::resolution("./a.md", "empty path");
        assert!(err.to_string().contains("./a.md"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_fatal());
    }
}
