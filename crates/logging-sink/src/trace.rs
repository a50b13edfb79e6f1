//! Sink construction tracing.

use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// Trace a newly opened file sink.
#[cfg(feature = "tracing")]
#[inline]
pub fn file_sink_opened(name: &str, path: &Path) {
    debug!(
        target: "logwire::sink",
        sink = name,
        path = %path.display(),
        "opened file sink {} at {}",
        name,
        path.display()
    );
}

/// Trace a newly opened file sink - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn file_sink_opened(_name: &str, _path: &Path) {}

/// Trace reuse of a cached file sink.
#[cfg(feature = "tracing")]
#[inline]
pub fn file_sink_reused(name: &str, path: &Path) {
    debug!(
        target: "logwire::sink",
        sink = name,
        path = %path.display(),
        "reusing file sink at {} for {}",
        path.display(),
        name
    );
}

/// Trace reuse of a cached file sink - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn file_sink_reused(_name: &str, _path: &Path) {}

/// Warn about an open failure that will be retried under another name.
#[cfg(feature = "tracing")]
#[inline]
pub fn open_retry(path: &Path, attempt: u32, err: &std::io::Error) {
    warn!(
        target: "logwire::sink",
        path = %path.display(),
        attempt = attempt,
        "cannot open {} ({}), retrying under another name",
        path.display(),
        err
    );
}

/// Warn about a retried open - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn open_retry(_path: &Path, _attempt: u32, _err: &std::io::Error) {}

/// Trace a sink name nothing knows how to build.
#[cfg(feature = "tracing")]
#[inline]
pub fn sink_skipped(name: &str) {
    warn!(target: "logwire::sink", sink = name, "skipping unknown sink {}", name);
}

/// Trace a skipped sink name - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn sink_skipped(_name: &str) {}

/// Trace a completed rotation.
#[cfg(feature = "tracing")]
#[inline]
pub fn rotated(path: &Path) {
    debug!(target: "logwire::sink", path = %path.display(), "rotated {}", path.display());
}

/// Trace a completed rotation - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn rotated(_path: &Path) {}
