#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging_config` holds the string-keyed configuration that drives logger
//! and sink construction. A [`ConfigStore`] always contains the built-in
//! defaults from [`keys::DEFAULTS`]; external maps and configuration files are
//! merged over them.
//!
//! # Design
//!
//! Keys for a particular logger or sink are built from templates such as
//! `*_level` by substituting the name ([`keys::expand`]). Typed views
//! ([`LoggerSettings`], [`FileSinkSettings`]) resolve every per-name key with
//! a fallback to the root logger (`root_logger_*`) or default file sink
//! (`file_*`).
//!
//! # Invariants
//!
//! - Every store holds at least the default keys; [`ConfigStore::replace`]
//!   backfills them and [`ConfigStore::update`] never removes keys.
//! - `custom_logger_names` is appended to by [`ConfigStore::update`], never
//!   overwritten.
//! - A failed load leaves the store unchanged.
//!
//! # File format
//!
//! One `key = value` per line. Blank lines and lines starting with `#` are
//! ignored, spaces and tabs around key and value are trimmed and one pair of
//! surrounding double quotes is stripped from the value. Lines without a
//! usable `=` are skipped.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use logging_config::{ConfigStore, LoggerSettings};
//!
//! let mut store = ConfigStore::defaults();
//! store
//!     .load_from_reader(Cursor::new("custom_logger_names = net\nnet_level = error\n"))
//!     .unwrap();
//!
//! let net = LoggerSettings::resolve(&store, "net").unwrap();
//! assert_eq!(net.level, "error");
//! assert_eq!(net.sinks, ["console", "file"]);
//! ```

mod error;
pub mod keys;
mod parse;
mod settings;
mod store;
mod trace;

pub use error::{ConfigError, ConfigResult};
pub use settings::{FileSinkSettings, LoggerOverrides, LoggerSettings, logger_names};
pub use store::ConfigStore;
