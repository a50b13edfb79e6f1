//! crates/orchestrator/src/error.rs
//!
//! Errors raised while configuring or initialising the orchestrator.

use std::fmt;

use logging::{RegistryError, SinkError};
use logging_config::ConfigError;
use logging_sink::SinkFactoryError;
use thiserror::Error;

/// The explicit override that arrived after the orchestrator was built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverrideKind {
    /// An explicitly configured orchestrator instance.
    LoggerInstance,
    /// A configuration map passed to `set_config`.
    ConfigMap,
    /// A configuration file passed to `set_config_file`.
    ConfigFile,
}

impl fmt::Display for OverrideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoggerInstance => "an explicit logger instance",
            Self::ConfigMap => "an external configuration",
            Self::ConfigFile => "an external configuration file",
        })
    }
}

/// Failures of orchestrator construction and of late overrides.
#[derive(Debug, Error)]
pub enum InitError {
    /// The orchestrator already exists.
    #[error("logging is already initialised; cannot apply {0}")]
    AlreadyInitialized(OverrideKind),
    /// A logger setting is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The sinks of a logger could not be built.
    #[error("failed to build sinks for logger '{logger}': {source}")]
    Sinks {
        /// Logger being configured.
        logger: String,
        /// Underlying factory failure.
        #[source]
        source: SinkFactoryError,
    },
    /// A logger could not be started.
    #[error("failed to start logger '{logger}': {source}")]
    Logger {
        /// Logger being configured.
        logger: String,
        /// Underlying failure.
        #[source]
        source: SinkError,
    },
    /// A logger name is already taken in the registry.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn already_initialized_names_the_override() {
        let err = InitError::AlreadyInitialized(OverrideKind::ConfigFile);
        assert_eq!(
            err.to_string(),
            "logging is already initialised; cannot apply an external configuration file"
        );
    }

    #[test]
    fn sinks_error_chains_source() {
        let err = InitError::Sinks {
            logger: "net".to_owned(),
            source: ConfigError::MissingKey("net_size".to_owned()).into(),
        };
        assert!(err.to_string().contains("'net'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn registry_error_is_transparent() {
        let err: InitError = RegistryError::Duplicate("root_logger".to_owned()).into();
        assert_eq!(err.to_string(), "logger 'root_logger' is already registered");
    }
}
