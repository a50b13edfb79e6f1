#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the small engine the logwire orchestration layer configures.
//! It provides severity [`Level`]s, owned [`Record`]s, [`Pattern`] based
//! formatting, the [`Sink`] trait, synchronous and asynchronous [`Logger`]s
//! and a concurrent name to logger [`Registry`].
//!
//! # Design
//!
//! A logger renders each record once with its pattern and hands the line to
//! every sink. Sinks are shared (`Arc<dyn Sink>`) so two loggers configured
//! with the same destination write through one handle; each sink serialises
//! its own writes. Asynchronous loggers move records through a bounded
//! [`crossbeam_channel`] queue of [`ASYNC_QUEUE_CAPACITY`] entries to one
//! worker thread, blocking producers while the queue is full.
//!
//! # Errors
//!
//! [`Logger::try_log`] and [`Logger::flush`] return [`SinkError`]. The
//! convenience methods ([`Logger::info`] and friends) and asynchronous
//! workers pass failures to the logger's error handler, which by default
//! reports them through `tracing` and standard error.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging::{CaptureSink, Level, Logger, Pattern};
//!
//! let capture = Arc::new(CaptureSink::new());
//! let logger = Logger::builder("net")
//!     .sink(capture.clone())
//!     .pattern(Pattern::new("[%n] [%l] %v"))
//!     .level(Level::Info)
//!     .build()
//!     .unwrap();
//!
//! logger.debug("hidden");
//! logger.warn("link down");
//! assert_eq!(capture.lines(), ["[net] [warning] link down"]);
//! ```

mod error;
mod level;
mod logger;
mod pattern;
mod record;
mod registry;
mod sink;
mod trace;

pub use error::{LookupError, RegistryError, SinkError};
pub use level::{Level, ParseLevelError};
pub use logger::{ASYNC_QUEUE_CAPACITY, ErrorHandler, Logger, LoggerBuilder};
pub use pattern::{Pattern, init_local_offset};
pub use record::{Location, Record};
pub use registry::Registry;
pub use sink::{CaptureSink, Sink};
