//! crates/logging/src/sink.rs
//! The [`Sink`] trait and an in-memory sink for tests and diagnostics.

use std::sync::{Mutex, PoisonError};

use crate::error::SinkError;
use crate::level::Level;

/// Destination for formatted records.
///
/// Sinks are shared between loggers and threads, so every implementation
/// serialises its own writes.
pub trait Sink: Send + Sync {
    /// Writes one formatted record. `formatted` already ends with a newline.
    fn log(&self, level: Level, formatted: &str) -> Result<(), SinkError>;

    /// Flushes buffered output.
    fn flush(&self) -> Result<(), SinkError>;
}

/// Sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct CaptureSink {
    records: Mutex<Vec<(Level, String)>>,
}

impl CaptureSink {
    /// Creates an empty capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured records.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured records with the trailing newline removed.
    pub fn lines(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .map(|(_, line)| line.trim_end_matches('\n').to_owned())
            .collect()
    }

    /// Drops every captured record.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for CaptureSink {
    fn log(&self, level: Level, formatted: &str) -> Result<(), SinkError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, formatted.to_owned()));
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
