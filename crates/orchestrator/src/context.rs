//! crates/orchestrator/src/context.rs
//!
//! Exactly-once construction of the orchestrator and the external
//! configuration it is built from.
//!
//! # Locking
//!
//! The orchestrator slot is guarded by its own mutex, held for the whole of
//! construction, so concurrent first calls build exactly once and every
//! caller receives the same instance. External configuration and the
//! external configuration file each have their own mutex. Construction
//! marks the context as constructed *before* it reads either of them, and
//! each setter checks that mark while holding its own lock. A setter
//! therefore either completes before construction reads its value or fails
//! with [`InitError::AlreadyInitialized`].
//!
//! Lock order is orchestrator slot, then external configuration, then
//! external file. Setters only ever take one lock.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use logging::Registry;
use logging_config::ConfigStore;
use logging_sink::SinkCache;

use crate::error::{InitError, OverrideKind};
use crate::orchestrator::{Orchestrator, OrchestratorBuilder};
use crate::trace;

static GLOBAL: LazyLock<Context> = LazyLock::new(Context::new);

/// Owner of one orchestrator, its registry and its shared file sinks.
#[derive(Debug, Default)]
pub struct Context {
    orchestrator: Mutex<Option<Arc<Orchestrator>>>,
    constructed: AtomicBool,
    ext_config: Mutex<Option<ConfigStore>>,
    ext_file: Mutex<Option<PathBuf>>,
    registry: Arc<Registry>,
    sinks: SinkCache,
}

impl Context {
    /// Creates an empty context.
    ///
    /// Most programs use [`Context::global`]; separate contexts are useful
    /// for embedding and tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// The context shared by the whole process.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Registers configuration entries to use when the orchestrator is built.
    ///
    /// With `clear_old`, or when nothing was registered before, the entries
    /// replace any earlier registration and missing defaults are filled in.
    /// Otherwise they are merged into the earlier registration.
    ///
    /// # Errors
    ///
    /// [`InitError::AlreadyInitialized`] once the orchestrator exists.
    pub fn set_config<I, K, V>(&self, entries: I, clear_old: bool) -> Result<(), InitError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut ext = self.ext_config.lock().unwrap_or_else(PoisonError::into_inner);
        self.ensure_unconstructed(OverrideKind::ConfigMap)?;
        match ext.as_mut() {
            Some(existing) if !clear_old => existing.update(entries),
            _ => *ext = Some(ConfigStore::from_entries(entries)),
        }
        Ok(())
    }

    /// Registers a configuration file to read when the orchestrator is built.
    ///
    /// Ignored when a configuration was also registered through
    /// [`set_config`](Self::set_config).
    ///
    /// # Errors
    ///
    /// [`InitError::AlreadyInitialized`] once the orchestrator exists.
    pub fn set_config_file(&self, path: impl AsRef<Path>) -> Result<(), InitError> {
        let mut ext = self.ext_file.lock().unwrap_or_else(PoisonError::into_inner);
        self.ensure_unconstructed(OverrideKind::ConfigFile)?;
        *ext = Some(path.as_ref().to_path_buf());
        Ok(())
    }

    /// A copy of the configuration registered through
    /// [`set_config`](Self::set_config).
    pub fn external_config(&self) -> Option<ConfigStore> {
        self.ext_config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The file registered through [`set_config_file`](Self::set_config_file).
    pub fn external_config_file(&self) -> Option<PathBuf> {
        self.ext_file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The orchestrator, built from external settings on first use.
    ///
    /// # Errors
    ///
    /// Any construction failure. Nothing stays registered and no file opened
    /// by the failed attempt stays cached, so a later call tries again with
    /// fresh settings.
    pub fn instance(&self) -> Result<Arc<Orchestrator>, InitError> {
        self.initialize(None)
    }

    /// Builds the orchestrator from `config`.
    ///
    /// # Errors
    ///
    /// [`InitError::AlreadyInitialized`] when the orchestrator exists, or any
    /// construction failure.
    pub fn instance_with_config(
        &self,
        config: ConfigStore,
    ) -> Result<Arc<Orchestrator>, InitError> {
        self.initialize(Some(OrchestratorBuilder::new().config(config)))
    }

    /// Builds the orchestrator from `builder`.
    ///
    /// # Errors
    ///
    /// [`InitError::AlreadyInitialized`] when the orchestrator exists, or any
    /// construction failure.
    pub fn instance_with(
        &self,
        builder: OrchestratorBuilder,
    ) -> Result<Arc<Orchestrator>, InitError> {
        self.initialize(Some(builder))
    }

    /// The orchestrator if it has been built.
    pub fn get(&self) -> Option<Arc<Orchestrator>> {
        self.orchestrator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the orchestrator has been built or is being built.
    pub fn is_initialized(&self) -> bool {
        self.constructed.load(Ordering::SeqCst)
    }

    /// Registry holding every logger this context built.
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// File sinks shared by this context's loggers.
    pub const fn sink_cache(&self) -> &SinkCache {
        &self.sinks
    }

    /// Drops the orchestrator, its loggers, cached sinks and external settings.
    #[cfg(any(test, feature = "test-support"))]
    pub fn reset(&self) {
        let mut slot = self.orchestrator.lock().unwrap_or_else(PoisonError::into_inner);
        slot.take();
        self.registry.drop_all();
        self.sinks.clear();
        self.ext_config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.ext_file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.constructed.store(false, Ordering::SeqCst);
    }

    fn ensure_unconstructed(&self, kind: OverrideKind) -> Result<(), InitError> {
        if self.constructed.load(Ordering::SeqCst) {
            return Err(InitError::AlreadyInitialized(kind));
        }
        Ok(())
    }

    fn initialize(
        &self,
        explicit: Option<OrchestratorBuilder>,
    ) -> Result<Arc<Orchestrator>, InitError> {
        let mut slot = self.orchestrator.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = slot.as_ref() {
            if explicit.is_some() {
                return Err(InitError::AlreadyInitialized(OverrideKind::LoggerInstance));
            }
            return Ok(Arc::clone(existing));
        }

        self.constructed.store(true, Ordering::SeqCst);
        match explicit
            .unwrap_or_default()
            .build(self, &self.registry, &self.sinks)
        {
            Ok(orchestrator) => {
                let orchestrator = Arc::new(orchestrator);
                *slot = Some(Arc::clone(&orchestrator));
                Ok(orchestrator)
            }
            Err(err) => {
                trace::init_failed(&err);
                self.constructed.store(false, Ordering::SeqCst);
                Err(err)
            }
        }
    }
}
