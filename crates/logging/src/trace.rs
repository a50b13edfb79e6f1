//! Diagnostics about the engine itself, routed through `tracing`.

#[cfg(feature = "tracing")]
use tracing::{debug, error};

use crate::error::SinkError;

/// Report a sink failure that could not be returned to the caller.
#[cfg(feature = "tracing")]
#[inline]
pub fn sink_failed(logger: &str, err: &SinkError) {
    error!(
        target: "logwire::sink",
        logger = logger,
        error = %err,
        "sink failure in logger {}: {}",
        logger,
        err
    );
}

/// Report a sink failure - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn sink_failed(_logger: &str, _err: &SinkError) {}

/// Trace the start of an asynchronous worker.
#[cfg(feature = "tracing")]
#[inline]
pub fn worker_started(logger: &str) {
    debug!(target: "logwire::sink", logger = logger, "async worker started for {}", logger);
}

/// Trace the start of an asynchronous worker - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn worker_started(_logger: &str) {}

/// Trace the end of an asynchronous worker.
#[cfg(feature = "tracing")]
#[inline]
pub fn worker_stopped(logger: &str) {
    debug!(target: "logwire::sink", logger = logger, "async worker stopped for {}", logger);
}

/// Trace the end of an asynchronous worker - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn worker_stopped(_logger: &str) {}
