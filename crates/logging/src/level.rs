//! crates/logging/src/level.rs
//! Severity levels and their textual names.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity of a record, ordered from most to least verbose.
///
/// [`Level::Off`] is only meaningful as a logger threshold; it disables
/// every record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Finest-grained tracing output.
    Trace,
    /// Debugging detail.
    Debug,
    /// Normal operational messages.
    Info,
    /// Something unexpected that did not stop the operation.
    #[cfg_attr(feature = "serde", serde(rename = "warning"))]
    Warn,
    /// A failed operation.
    Error,
    /// A failure the process may not survive.
    Critical,
    /// Threshold that suppresses every record.
    Off,
}

/// Error returned by [`Level::from_str`] for an unrecognised name.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown log level '{0}'")]
pub struct ParseLevelError(pub String);

impl Level {
    /// All levels from most to least verbose.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Critical,
        Self::Off,
    ];

    /// The configuration name of the level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Off => "off",
        }
    }

    /// Single upper-case letter used by the `%L` pattern flag.
    pub const fn short_name(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
            Self::Critical => 'C',
            Self::Off => 'O',
        }
    }

    /// Looks up a level by name, ignoring ASCII case and surrounding whitespace.
    ///
    /// `warn` and `err` are accepted as aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("warn") {
            return Some(Self::Warn);
        }
        if name.eq_ignore_ascii_case("err") {
            return Some(Self::Error);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
    }

    /// Like [`Level::from_name`], but an unknown name selects [`Level::Trace`].
    pub fn parse_or_most_verbose(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::Trace)
    }

    pub(crate) const fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Trace,
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Error,
            5 => Self::Critical,
            _ => Self::Off,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseLevelError(s.to_owned()))
    }
}
