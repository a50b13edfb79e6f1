//! crates/logging/src/error.rs
//!
//! Error types for sinks, loggers and the logger registry.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by a sink while opening, writing, flushing or rotating.
#[derive(Debug, Error)]
pub enum SinkError {
    /// A log file could not be opened.
    #[error("failed to open log file {}: {source}", path.display())]
    Open {
        /// Path that was attempted last.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A history file could not be removed during rotation.
    #[error("failed to remove rotated log file {}: {source}", path.display())]
    Remove {
        /// File that could not be removed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A log file could not be renamed during rotation.
    #[error("failed to rename log file {} to {}: {source}", from.display(), to.display())]
    Rename {
        /// Source of the rename.
        from: PathBuf,
        /// Target of the rename.
        to: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The active file could not be reopened after rotation.
    #[error("failed to reopen log file {} after rotation: {source}", path.display())]
    Reopen {
        /// Active file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A previous rotation failed and left the sink without a file.
    #[error("log file {} is closed after a failed rotation", path.display())]
    Closed {
        /// Active file path.
        path: PathBuf,
    },
    /// The background worker of an asynchronous logger has stopped.
    #[error("asynchronous worker of logger '{0}' has stopped")]
    WorkerStopped(String),
    /// Writing or flushing failed.
    #[error("I/O error: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
}

/// Failure to register a logger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A logger with the same name is already registered.
    #[error("logger '{0}' is already registered")]
    Duplicate(String),
}

/// Failure to find a logger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No logger with the name is registered.
    #[error("logger '{0}' not found")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn open_error_shows_path_and_source() {
        let err = SinkError::Open {
            path: PathBuf::from("/var/log/app.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/var/log/app.log"));
        assert!(err.source().is_some());
    }

    #[test]
    fn rename_error_shows_both_paths() {
        let err = SinkError::Rename {
            from: PathBuf::from("a.log"),
            to: PathBuf::from("a.log.1"),
            source: io::Error::other("busy"),
        };
        let text = err.to_string();
        assert!(text.contains("a.log to a.log.1"));
    }

    #[test]
    fn io_error_converts() {
        let err: SinkError = io::Error::new(io::ErrorKind::WriteZero, "full").into();
        assert!(matches!(err, SinkError::Io(_)));
    }

    #[test]
    fn registry_and_lookup_messages() {
        assert_eq!(
            RegistryError::Duplicate("net".to_owned()).to_string(),
            "logger 'net' is already registered"
        );
        assert_eq!(
            LookupError::NotFound("db".to_owned()).to_string(),
            "logger 'db' not found"
        );
    }
}
