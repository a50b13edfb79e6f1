//! crates/logging-sink/src/error.rs
//!
//! Errors raised while turning sink names into sink instances.

use std::io;

use logging::SinkError;
use logging_config::ConfigError;
use thiserror::Error;

/// Failures of [`SinkFactory`](crate::SinkFactory) and custom sink providers.
#[derive(Debug, Error)]
pub enum SinkFactoryError {
    /// A sink setting is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The sink could not be opened.
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// The executable's directory could not be determined for a `$` path.
    #[error("failed to determine the executable directory: {0}")]
    ExecutablePath(#[source] io::Error),
    /// A relative path could not be made absolute.
    #[error("failed to determine the working directory: {0}")]
    WorkingDirectory(#[source] io::Error),
    /// A custom sink provider failed.
    #[error("custom sink '{name}' failed: {source}")]
    Custom {
        /// Logical sink name.
        name: String,
        /// The provider's error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
