//! crates/test-support/src/lib.rs
//!
//! Shared helpers for logwire tests: scratch directories that log files are
//! pointed into, configuration builders and an in-memory writer.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use logging_config::ConfigStore;
use logging_config::keys::{
    DEFAULT_FILE_SINK_NAME, FILE_FULL_NAME_KEY, LOGGER_SINKS_KEY, ROOT_LOGGER_NAME, expand,
};
use tempfile::TempDir;

/// Extension appended to every rotating log file.
pub const LOG_EXTENSION: &str = "log";

/// A temporary directory that receives the log files of a test.
///
/// The directory and everything in it is removed on drop.
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Creates a fresh scratch directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create scratch dir"),
        }
    }

    /// Root of the scratch directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Extension-less base path for a sink named `name`.
    pub fn base(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// `base(name)` as the string a `*_full_name` key expects.
    pub fn base_str(&self, name: &str) -> String {
        self.base(name).display().to_string()
    }

    /// Active log file for the sink based at `name`.
    pub fn active_log(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{name}.{LOG_EXTENSION}"))
    }

    /// History file `index` for the sink based at `name`.
    pub fn history_log(&self, name: &str, index: usize) -> PathBuf {
        self.dir
            .path()
            .join(format!("{name}.{LOG_EXTENSION}.{index}"))
    }

    /// Reads a file below the scratch directory, empty when it does not exist.
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    /// Lines of the active log of `name`.
    pub fn active_lines(&self, name: &str) -> Vec<String> {
        self.read(self.active_log(name))
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Writes a configuration file into the scratch directory.
    pub fn write_config(&self, file_name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(file_name);
        fs::write(&path, body).expect("write config file");
        path
    }

    /// Builds a store whose default file sink lives in this directory.
    ///
    /// The root logger only writes to the `file` sink unless `entries`
    /// overrides `root_logger_sinks`, keeping test output off the console.
    pub fn store<I, K, V>(&self, entries: I) -> ConfigStore
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = ConfigStore::defaults();
        store.update([
            (
                expand(FILE_FULL_NAME_KEY, DEFAULT_FILE_SINK_NAME),
                self.base_str("defaultLog"),
            ),
            (
                expand(LOGGER_SINKS_KEY, ROOT_LOGGER_NAME),
                DEFAULT_FILE_SINK_NAME.to_owned(),
            ),
        ]);
        store.update(entries);
        store
    }
}

impl Default for ScratchDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable in-memory writer; every clone appends to the same buffer.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
