//! Initialisation tracing.

use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::{debug, info, warn};

use crate::source::ConfigSource;

/// Trace the configuration source chosen for a new orchestrator.
#[cfg(feature = "tracing")]
#[inline]
pub fn config_resolved(source: ConfigSource) {
    info!(target: "logwire::init", source = %source, "logging configuration from {}", source);
}

/// Trace the chosen configuration source - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn config_resolved(_source: ConfigSource) {}

/// Trace a configuration file that could not be used.
#[cfg(feature = "tracing")]
#[inline]
pub fn config_file_unusable(path: &Path, err: &logging_config::ConfigError) {
    debug!(
        target: "logwire::init",
        path = %path.display(),
        "config file {} not used: {}",
        path.display(),
        err
    );
}

/// Trace an unusable configuration file - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn config_file_unusable(_path: &Path, _err: &logging_config::ConfigError) {}

/// Trace a constructed logger.
#[cfg(feature = "tracing")]
#[inline]
pub fn logger_built(logger: &logging::Logger) {
    debug!(
        target: "logwire::init",
        logger = logger.name(),
        level = %logger.level(),
        sinks = logger.sink_count(),
        asynchronous = logger.is_async(),
        "built logger {}",
        logger.name()
    );
}

/// Trace a constructed logger - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn logger_built(_logger: &logging::Logger) {}

/// Warn about an initialisation that was rolled back.
#[cfg(feature = "tracing")]
#[inline]
pub fn init_failed(err: &crate::InitError) {
    warn!(target: "logwire::init", error = %err, "logging initialisation failed: {}", err);
}

/// Warn about a rolled back initialisation - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn init_failed(_err: &crate::InitError) {}
