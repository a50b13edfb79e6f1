//! crates/logging-sink/src/factory.rs
//! Turns logical sink names into shared sink instances.
//!
//! The kind of a sink called `s` comes from the `<s>_sink` key (`Console`,
//! `RotateFile` or `RotatingFile`). Without that key the name decides:
//! `console` is the console and any name ending in `file` is a rotating file.
//! Names that match neither go to the optional [`SinkProvider`] and are
//! skipped when it does not recognise them either.
//!
//! File sinks are shared through a [`SinkCache`] keyed by the normalised
//! absolute path, so every logger that resolves to the same file writes
//! through one handle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use logging::{Sink, SinkError};
use logging_config::keys::{
    CONSOLE_SINK_NAME, DEFAULT_FILE_SINK_NAME, SINK_KIND_CONSOLE, SINK_KIND_KEY,
    SINK_KIND_ROTATING_FILE, SINK_KIND_ROTATING_FILE_ALT, expand,
};
use logging_config::{ConfigStore, FileSinkSettings};

use crate::console::ConsoleSink;
use crate::error::SinkFactoryError;
use crate::platform;
use crate::rotating::RotatingFileSink;

/// How many alternate names are tried after a retryable open failure.
pub const MAX_OPEN_RETRIES: u32 = 10;

/// Built-in sink kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SinkKind {
    /// The shared standard output sink.
    Console,
    /// A size-rotated file.
    RotatingFile,
}

impl SinkKind {
    /// Parses a `<s>_sink` discriminator value.
    pub fn from_discriminator(value: &str) -> Option<Self> {
        match value.trim() {
            SINK_KIND_CONSOLE => Some(Self::Console),
            SINK_KIND_ROTATING_FILE | SINK_KIND_ROTATING_FILE_ALT => Some(Self::RotatingFile),
            _ => None,
        }
    }

    /// Determines the kind of the sink called `name`.
    ///
    /// `None` means the name is not a built-in sink.
    pub fn detect(config: &ConfigStore, name: &str) -> Option<Self> {
        match config.value(&expand(SINK_KIND_KEY, name)) {
            Some(value) => Self::from_discriminator(value),
            None if name == CONSOLE_SINK_NAME => Some(Self::Console),
            None if name.ends_with(DEFAULT_FILE_SINK_NAME) => Some(Self::RotatingFile),
            None => None,
        }
    }
}

/// Builds sinks the built-in factory does not know.
pub trait SinkProvider: Send + Sync {
    /// Returns a sink for `name`, or `Ok(None)` when `name` is not handled.
    fn create_sink(
        &self,
        name: &str,
        config: &ConfigStore,
    ) -> Result<Option<Arc<dyn Sink>>, SinkFactoryError>;
}

/// File sinks keyed by their normalised path.
#[derive(Debug, Default)]
pub struct SinkCache {
    files: Mutex<HashMap<PathBuf, Arc<RotatingFileSink>>>,
}

impl SinkCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached sink for `path`, if any.
    pub fn get(&self, path: &Path) -> Option<Arc<RotatingFileSink>> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Number of cached file sinks.
    pub fn len(&self) -> usize {
        self.files.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no file sink is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every cached sink. Sinks still held by loggers stay open.
    pub fn clear(&self) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Forgets the sinks cached under `keys` and returns how many were found.
    ///
    /// Used to undo the opens of a failed construction so a retry reads its
    /// file settings afresh.
    pub fn evict(&self, keys: &[PathBuf]) -> usize {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        keys.iter().filter(|key| files.remove(*key).is_some()).count()
    }

    fn get_or_open(
        &self,
        key: PathBuf,
        open: impl FnOnce(&Path) -> Result<RotatingFileSink, SinkFactoryError>,
    ) -> Result<(Arc<RotatingFileSink>, bool), SinkFactoryError> {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = files.get(&key) {
            return Ok((Arc::clone(existing), false));
        }
        let sink = Arc::new(open(&key)?);
        files.insert(key, Arc::clone(&sink));
        Ok((sink, true))
    }
}

/// Resolves sink names against one configuration.
pub struct SinkFactory<'a> {
    config: &'a ConfigStore,
    cache: &'a SinkCache,
    provider: Option<&'a dyn SinkProvider>,
    opened: RefCell<Vec<PathBuf>>,
}

impl<'a> SinkFactory<'a> {
    /// A factory reading `config` and sharing file sinks through `cache`.
    pub const fn new(config: &'a ConfigStore, cache: &'a SinkCache) -> Self {
        Self {
            config,
            cache,
            provider: None,
            opened: RefCell::new(Vec::new()),
        }
    }

    /// Consults `provider` for names that are not built-in sinks.
    pub fn with_provider(mut self, provider: &'a dyn SinkProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Builds every sink in `names`, skipping the ones nothing recognises.
    pub fn build<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<Arc<dyn Sink>>, SinkFactoryError> {
        let mut sinks = Vec::with_capacity(names.len());
        for name in names {
            if let Some(sink) = self.sink(name.as_ref())? {
                sinks.push(sink);
            }
        }
        Ok(sinks)
    }

    /// Builds the sink called `name`.
    pub fn sink(&self, name: &str) -> Result<Option<Arc<dyn Sink>>, SinkFactoryError> {
        match SinkKind::detect(self.config, name) {
            Some(SinkKind::Console) => {
                let sink: Arc<dyn Sink> = ConsoleSink::stdout();
                Ok(Some(sink))
            }
            Some(SinkKind::RotatingFile) => {
                let sink: Arc<dyn Sink> = self.rotating_file(name)?;
                Ok(Some(sink))
            }
            None => {
                let custom = match self.provider {
                    Some(provider) => provider.create_sink(name, self.config)?,
                    None => None,
                };
                if custom.is_none() {
                    crate::trace::sink_skipped(name);
                }
                Ok(custom)
            }
        }
    }

    /// The canonical cache key of the file sink called `name`.
    pub fn file_key(&self, name: &str) -> Result<PathBuf, SinkFactoryError> {
        let raw = FileSinkSettings::resolve_path(self.config, name)?;
        let path =
            platform::expand_executable_dir(&raw).map_err(SinkFactoryError::ExecutablePath)?;
        platform::normalize(&path).map_err(SinkFactoryError::WorkingDirectory)
    }

    /// Cache keys of the file sinks this factory opened, in opening order.
    ///
    /// Sinks that were already cached are not listed.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }

    /// Returns the shared rotating file sink called `name`, opening it on first use.
    pub fn rotating_file(&self, name: &str) -> Result<Arc<RotatingFileSink>, SinkFactoryError> {
        let key = self.file_key(name)?;
        let (sink, opened) = self.cache.get_or_open(key.clone(), |path| {
            let settings = FileSinkSettings::resolve(self.config, name)?;
            Ok(open_with_retry(path, &settings)?)
        })?;
        if opened {
            self.opened.borrow_mut().push(key);
            crate::trace::file_sink_opened(name, sink.active_path());
        } else {
            crate::trace::file_sink_reused(name, sink.active_path());
        }
        Ok(sink)
    }
}

fn open_with_retry(
    path: &Path,
    settings: &FileSinkSettings,
) -> Result<RotatingFileSink, SinkError> {
    let open = |candidate: &Path| {
        RotatingFileSink::open(
            candidate,
            settings.max_size,
            settings.max_files,
            settings.force_flush,
        )
    };

    let mut attempt = 0;
    let mut candidate = path.to_path_buf();
    loop {
        match open(&candidate) {
            Err(SinkError::Open { ref source, .. })
                if attempt < MAX_OPEN_RETRIES && platform::is_retryable_open_error(source) =>
            {
                attempt += 1;
                crate::trace::open_retry(&candidate, attempt, source);
                candidate = platform::alternate_name(path, attempt);
            }
            result => return result,
        }
    }
}
