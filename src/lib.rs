#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `logwire` builds a set of named loggers from a flat key/value
//! configuration and wires them to console and size-rotated file sinks.
//! Configuration comes from a file, from entries registered in code, or from
//! built-in defaults, and the loggers are constructed exactly once per
//! process on first use.
//!
//! # Design
//!
//! The crate is a facade over the workspace:
//!
//! - [`logging_config`]: the configuration store, its file format and the
//!   per-logger and per-sink settings resolved from it.
//! - [`logging`]: levels, patterns, loggers and the registry.
//! - [`logging_sink`]: console and rotating file sinks and the factory that
//!   builds and shares them.
//! - [`orchestrator`]: the [`Context`] that constructs every configured
//!   logger once.
//!
//! The free functions in this crate operate on [`Context::global`].
//!
//! # Invariants
//!
//! - [`set_config`] and [`set_config_file`] only succeed before the first
//!   call to [`instance`] (or [`logger`], [`config`], [`config_source`]).
//! - [`logger`] never fails for an unknown name while a root logger exists;
//!   it returns the root logger instead.
//!
//! # Examples
//!
//! ```no_run
//! logwire::set_config(
//!     [("custom_logger_names", "net"), ("net_level", "info")],
//!     true,
//! )
//! .unwrap();
//!
//! let net = logwire::logger("net").unwrap();
//! net.info("listening");
//! net.warn(format_args!("{} retries left", 3));
//! ```

pub mod cli;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

pub use logging::{
    ASYNC_QUEUE_CAPACITY, CaptureSink, ErrorHandler, Level, Location, Logger, LoggerBuilder,
    LookupError, ParseLevelError, Pattern, Record, Registry, RegistryError, Sink, SinkError,
};
pub use logging_config::{
    ConfigError, ConfigStore, FileSinkSettings, LoggerSettings, keys,
};
pub use logging_sink::{
    ConsoleSink, RotatingFileSink, SinkCache, SinkFactory, SinkFactoryError, SinkKind,
    SinkProvider,
};
pub use orchestrator::{
    ConfigSource, Context, InitError, Orchestrator, OrchestratorBuilder, OverrideKind,
};

/// Failures of the facade's convenience functions.
#[derive(Debug, Error)]
pub enum Error {
    /// Logging could not be initialised.
    #[error(transparent)]
    Init(#[from] InitError),
    /// Neither the requested nor the root logger exists.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// A sink failed while flushing.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Registers configuration entries for the global context.
///
/// See [`Context::set_config`].
pub fn set_config<I, K, V>(entries: I, clear_old: bool) -> Result<(), InitError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    Context::global().set_config(entries, clear_old)
}

/// Registers a configuration file for the global context.
pub fn set_config_file(path: impl AsRef<Path>) -> Result<(), InitError> {
    Context::global().set_config_file(path)
}

/// Enables or disables level coloring on the console.
pub fn set_colored(enabled: bool) {
    logging_sink::set_colored(enabled);
}

/// The global orchestrator, built on first use.
pub fn instance() -> Result<Arc<Orchestrator>, InitError> {
    Context::global().instance()
}

/// Builds the global orchestrator from `config`.
pub fn instance_with_config(config: ConfigStore) -> Result<Arc<Orchestrator>, InitError> {
    Context::global().instance_with_config(config)
}

/// Builds the global orchestrator from `builder`.
pub fn instance_with(builder: OrchestratorBuilder) -> Result<Arc<Orchestrator>, InitError> {
    Context::global().instance_with(builder)
}

/// The logger called `name`, or the root logger when there is none.
pub fn logger(name: &str) -> Result<Arc<Logger>, Error> {
    Ok(instance()?.logger(name)?)
}

/// The root logger.
pub fn root_logger() -> Result<Arc<Logger>, Error> {
    Ok(instance()?.root()?)
}

/// A copy of the configuration the global loggers were built from.
pub fn config() -> Result<ConfigStore, InitError> {
    Ok(instance()?.config().clone())
}

/// Where the global configuration came from.
pub fn config_source() -> Result<ConfigSource, InitError> {
    Ok(instance()?.config_source())
}

/// Flushes every globally configured logger.
pub fn flush_all() -> Result<(), Error> {
    instance()?.flush_all()?;
    Ok(())
}
