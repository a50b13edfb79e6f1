#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging_sink` provides the physical outputs loggers write to and the
//! factory that builds them from configuration:
//!
//! - [`ConsoleSink`]: standard output with level-based coloring controlled by
//!   [`set_colored`].
//! - [`RotatingFileSink`]: a size-rotated file keeping a fixed number of
//!   history files.
//! - [`SinkFactory`]: resolves logical sink names to instances, sharing file
//!   sinks through a [`SinkCache`] keyed by normalised path.
//!
//! # Invariants
//!
//! - There is one standard output sink per process.
//! - A [`SinkCache`] holds at most one file sink per normalised path; the
//!   cache has its own lock.
//! - A file sink whose rotation failed stays closed and rejects every later
//!   write with [`SinkError::Closed`](logging::SinkError::Closed).
//!
//! # Paths
//!
//! A file sink's `*_full_name` is the path without extension; `.log` is
//! appended. A leading `$` anchors the path at the running executable's
//! directory. When opening fails because the file is locked or not writable,
//! up to [`MAX_OPEN_RETRIES`] alternate names of the form `<path>.<pid>-<n>`
//! are tried.
//!
//! # Examples
//!
//! ```
//! use logging::{Level, Sink};
//! use logging_config::ConfigStore;
//! use logging_sink::{SinkCache, SinkFactory};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let base = dir.path().join("app").display().to_string();
//! let config = ConfigStore::from_entries([
//!     ("appfile_full_name", base.as_str()),
//!     ("appfile_size", "4096"),
//! ]);
//!
//! let cache = SinkCache::new();
//! let factory = SinkFactory::new(&config, &cache);
//! let sink = factory.rotating_file("appfile").unwrap();
//! sink.log(Level::Info, "ready\n").unwrap();
//! assert!(dir.path().join("app.log").exists());
//! ```

mod console;
mod error;
mod factory;
pub mod platform;
mod rotating;
mod trace;

pub use console::{ConsoleSink, colored, set_colored};
pub use error::SinkFactoryError;
pub use factory::{MAX_OPEN_RETRIES, SinkCache, SinkFactory, SinkKind, SinkProvider};
pub use rotating::{LOG_EXTENSION, RotatingFileSink};
