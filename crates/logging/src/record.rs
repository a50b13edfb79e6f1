//! crates/logging/src/record.rs
//! A single log event and its source location.

use std::sync::Arc;
use std::time::SystemTime;

use crate::level::Level;

/// Where a record was emitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// Source file path as recorded by the compiler.
    pub file: &'static str,
    /// One-based source line.
    pub line: u32,
    /// Enclosing function or module path, when the caller supplied one.
    pub function: Option<&'static str>,
}

impl Location {
    /// Location with an explicit function name.
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function: Some(function),
        }
    }

    /// Location of the code calling the `#[track_caller]` chain.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
            function: None,
        }
    }
}

/// An owned log event.
#[derive(Clone, Debug)]
pub struct Record {
    /// Name of the emitting logger.
    pub logger: Arc<str>,
    /// Severity.
    pub level: Level,
    /// Rendered message payload.
    pub message: String,
    /// Wall-clock time of emission.
    pub time: SystemTime,
    /// Source location, if known.
    pub location: Option<Location>,
}

impl Record {
    /// Creates a record stamped with the current time.
    pub fn new(logger: Arc<str>, level: Level, message: String) -> Self {
        Self {
            logger,
            level,
            message,
            time: SystemTime::now(),
            location: None,
        }
    }

    /// Attaches a source location.
    pub const fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_points_at_this_file() {
        let location = Location::caller();
        assert!(location.file.ends_with("record.rs"));
        assert!(location.line > 0);
        assert!(location.function.is_none());
    }

    #[test]
    fn with_location_sets_location() {
        let record = Record::new(Arc::from("net"), Level::Info, "hi".to_owned())
            .with_location(Location::new("a.rs", 7, "main"));
        assert_eq!(record.location.unwrap().line, 7);
        assert_eq!(record.location.unwrap().function, Some("main"));
    }
}
