//! crates/logging-config/src/error.rs
//!
//! Error types for configuration lookup and loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading or interpreting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the requested key nor its fallback is present.
    #[error("configuration key '{0}' not found")]
    MissingKey(String),
    /// A numeric setting could not be parsed.
    #[error("configuration key '{key}' has non-numeric value '{value}'")]
    InvalidNumber {
        /// Key holding the bad value.
        key: String,
        /// The value as written.
        value: String,
    },
    /// The configuration source could not be read.
    #[error("failed to read configuration from {}: {source}", path.display())]
    Read {
        /// Path of the configuration file, or a placeholder for readers.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn missing_key_names_the_key() {
        let err = ConfigError::MissingKey("net_level".to_owned());
        assert!(err.to_string().contains("net_level"));
        assert!(err.source().is_none());
    }

    #[test]
    fn invalid_number_shows_key_and_value() {
        let err = ConfigError::InvalidNumber {
            key: "file_size".to_owned(),
            value: "big".to_owned(),
        };
        let text = err.to_string();
        assert!(text.contains("file_size"));
        assert!(text.contains("'big'"));
    }

    #[test]
    fn read_error_keeps_source() {
        let err = ConfigError::read(
            "/nope/logwire.conf",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/nope/logwire.conf"));
        assert!(err.source().is_some());
    }
}
