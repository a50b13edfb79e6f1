#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! crates/orchestrator/src/lib.rs
//!
//! Exactly-once construction of every configured logger.
//!
//! # Overview
//!
//! A [`Context`] owns one [`Orchestrator`], the [`logging::Registry`] its
//! loggers live in and the cache that lets loggers share file sinks. The
//! orchestrator is built on the first call to [`Context::instance`] from the
//! first configuration available:
//!
//! 1. a configuration passed to [`Context::instance_with_config`]
//!    ([`ConfigSource::DirectParams`]);
//! 2. entries registered with [`Context::set_config`]
//!    ([`ConfigSource::ExtFuncSetting`]);
//! 3. the file registered with [`Context::set_config_file`], or
//!    `logwire.conf` in the working directory
//!    ([`ConfigSource::ExtFileSpecified`]);
//! 4. the built-in defaults ([`ConfigSource::Default`]).
//!
//! # Invariants
//!
//! - Concurrent first calls construct exactly once; all callers observe the
//!   same orchestrator.
//! - External settings are rejected once construction has begun.
//! - A failed construction leaves no logger registered; a later call
//!   retries.
//!
//! # Examples
//!
//! ```
//! use orchestrator::{ConfigSource, Context};
//!
//! let context = Context::new();
//! context
//!     .set_config([("root_logger_sinks", ""), ("custom_logger_names", "net")], true)
//!     .unwrap();
//!
//! let orchestrator = context.instance().unwrap();
//! assert_eq!(orchestrator.config_source(), ConfigSource::ExtFuncSetting);
//! assert_eq!(orchestrator.logger("net").unwrap().name(), "net");
//! assert_eq!(orchestrator.logger("unknown").unwrap().name(), "root_logger");
//! ```

mod context;
mod error;
mod orchestrator;
mod source;
mod trace;

pub use context::Context;
pub use error::{InitError, OverrideKind};
pub use orchestrator::{Orchestrator, OrchestratorBuilder};
pub use source::ConfigSource;
