//! crates/orchestrator/src/orchestrator.rs
//!
//! Construction of every configured logger from one resolved configuration.
//!
//! An [`Orchestrator`] is built in two phases. The first phase resolves each
//! logger's settings and sinks and starts the logger. Nothing is registered
//! until every logger has been built, so a failure leaves the registry
//! untouched. The second phase registers the loggers and removes the ones it
//! added if a name collides.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use logging::{Level, Logger, LookupError, Pattern, Registry, SinkError};
use logging_config::keys::{DEFAULT_CONFIG_FILE, ROOT_LOGGER_NAME};
use logging_config::{ConfigStore, LoggerSettings, logger_names};
use logging_sink::{SinkCache, SinkFactory, SinkProvider};

use crate::context::Context;
use crate::error::InitError;
use crate::source::ConfigSource;
use crate::trace;

/// Options for building an [`Orchestrator`].
///
/// Without an explicit configuration the builder falls back to the
/// context's external configuration, then its configuration file, then
/// [`DEFAULT_CONFIG_FILE`] in the working directory, then the defaults.
#[derive(Default)]
pub struct OrchestratorBuilder {
    config: Option<ConfigStore>,
    provider: Option<Arc<dyn SinkProvider>>,
}

impl OrchestratorBuilder {
    /// Creates a builder with no explicit configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` directly.
    #[must_use]
    pub fn config(mut self, config: ConfigStore) -> Self {
        self.config = Some(config);
        self
    }

    /// Consults `provider` for sink names the built-in kinds do not cover.
    #[must_use]
    pub fn sink_provider(mut self, provider: Arc<dyn SinkProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Builds every configured logger into `registry`.
    ///
    /// File sinks are shared through `cache`. External settings are taken
    /// from `context`.
    pub(crate) fn build(
        self,
        context: &Context,
        registry: &Arc<Registry>,
        cache: &SinkCache,
    ) -> Result<Orchestrator, InitError> {
        let (config, source) = match self.config {
            Some(config) => (config, ConfigSource::DirectParams),
            None => resolve_external(context),
        };
        trace::config_resolved(source);

        let names = logger_names(&config);
        {
            let mut factory = SinkFactory::new(&config, cache);
            if let Some(provider) = self.provider.as_deref() {
                factory = factory.with_provider(provider);
            }
            let built = build_loggers(&config, &names, &factory)
                .and_then(|loggers| register_all(registry, loggers));
            if let Err(err) = built {
                // Files opened by this attempt must not outlive it.
                cache.evict(&factory.opened());
                return Err(err);
            }
        }

        Ok(Orchestrator {
            config,
            source,
            registry: Arc::clone(registry),
            names,
        })
    }
}

impl fmt::Debug for OrchestratorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrchestratorBuilder")
            .field("config", &self.config)
            .field("provider", &self.provider.is_some())
            .finish()
    }
}

fn resolve_external(context: &Context) -> (ConfigStore, ConfigSource) {
    if let Some(config) = context.external_config() {
        return (config, ConfigSource::ExtFuncSetting);
    }

    let path = context
        .external_config_file()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = ConfigStore::defaults();
    match config.load_from_file(&path) {
        Ok(()) => (config, ConfigSource::ExtFileSpecified),
        Err(err) => {
            trace::config_file_unusable(&path, &err);
            (ConfigStore::defaults(), ConfigSource::Default)
        }
    }
}

fn build_loggers(
    config: &ConfigStore,
    names: &[String],
    factory: &SinkFactory<'_>,
) -> Result<Vec<Arc<Logger>>, InitError> {
    let mut loggers = Vec::with_capacity(names.len());
    for name in names {
        let settings = LoggerSettings::resolve(config, name)?;
        let sinks = factory
            .build(settings.sinks.as_slice())
            .map_err(|source| InitError::Sinks {
                logger: name.clone(),
                source,
            })?;
        let logger = Logger::builder(name.as_str())
            .sinks(sinks)
            .pattern(Pattern::new(&settings.format))
            .level(Level::parse_or_most_verbose(&settings.level))
            .asynchronous(settings.is_async)
            .build()
            .map_err(|source| InitError::Logger {
                logger: name.clone(),
                source,
            })?;
        trace::logger_built(&logger);
        loggers.push(Arc::new(logger));
    }
    Ok(loggers)
}

fn register_all(registry: &Registry, loggers: Vec<Arc<Logger>>) -> Result<(), InitError> {
    let mut registered: Vec<String> = Vec::with_capacity(loggers.len());
    for logger in loggers {
        let name = logger.name().to_owned();
        if let Err(err) = registry.register(logger) {
            for name in &registered {
                registry.remove(name);
            }
            return Err(err.into());
        }
        registered.push(name);
    }
    Ok(())
}

/// The configured loggers of one initialisation.
#[derive(Debug)]
pub struct Orchestrator {
    config: ConfigStore,
    source: ConfigSource,
    registry: Arc<Registry>,
    names: Vec<String>,
}

impl Orchestrator {
    /// The logger called `name`, or the one called `default_name` when no
    /// such logger exists.
    ///
    /// Fails with the requested name when neither is registered.
    pub fn get_logger(&self, name: &str, default_name: &str) -> Result<Arc<Logger>, LookupError> {
        self.registry
            .get(name)
            .or_else(|_| self.registry.get(default_name))
            .map_err(|_| LookupError::NotFound(name.to_owned()))
    }

    /// The logger called `name`, falling back to the root logger.
    pub fn logger(&self, name: &str) -> Result<Arc<Logger>, LookupError> {
        self.get_logger(name, ROOT_LOGGER_NAME)
    }

    /// The root logger.
    pub fn root(&self) -> Result<Arc<Logger>, LookupError> {
        self.registry.get(ROOT_LOGGER_NAME)
    }

    /// The configuration the loggers were built from.
    pub const fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Where [`config`](Self::config) came from.
    pub const fn config_source(&self) -> ConfigSource {
        self.source
    }

    /// Names of the configured loggers, sorted, root included.
    pub fn logger_names(&self) -> &[String] {
        &self.names
    }

    /// Flushes every configured logger.
    ///
    /// Every logger is flushed even after a failure; the first error is
    /// returned.
    pub fn flush_all(&self) -> Result<(), SinkError> {
        let mut first = None;
        for logger in self.names.iter().filter_map(|name| self.registry.get(name).ok()) {
            if let Err(err) = logger.flush()
                && first.is_none()
            {
                first = Some(err);
            }
        }
        first.map_or(Ok(()), Err)
    }
}
