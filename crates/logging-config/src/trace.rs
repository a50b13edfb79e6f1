//! Configuration loading diagnostics.

use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

/// Trace a configuration line that was ignored by the parser.
#[cfg(feature = "tracing")]
#[inline]
pub fn skipped_line(origin: &Path, line: usize) {
    trace!(
        target: "logwire::config",
        path = %origin.display(),
        line = line,
        "skipped config line {}:{}",
        origin.display(),
        line
    );
}

/// Trace a configuration line that was ignored - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn skipped_line(_origin: &Path, _line: usize) {}

/// Trace a successful configuration load.
#[cfg(feature = "tracing")]
#[inline]
pub fn loaded(origin: &Path, entries: usize) {
    debug!(
        target: "logwire::config",
        path = %origin.display(),
        entries = entries,
        "loaded {} entries from {}",
        entries,
        origin.display()
    );
}

/// Trace a successful configuration load - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn loaded(_origin: &Path, _entries: usize) {}
