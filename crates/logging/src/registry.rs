//! crates/logging/src/registry.rs
//! Concurrent name to logger map.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::{LookupError, RegistryError, SinkError};
use crate::logger::Logger;

/// Loggers addressable by name.
#[derive(Debug, Default)]
pub struct Registry {
    loggers: DashMap<String, Arc<Logger>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `logger` under its own name.
    pub fn register(&self, logger: Arc<Logger>) -> Result<(), RegistryError> {
        match self.loggers.entry(logger.name().to_owned()) {
            Entry::Occupied(entry) => Err(RegistryError::Duplicate(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(logger);
                Ok(())
            }
        }
    }

    /// Looks up the logger called `name`.
    pub fn get(&self, name: &str) -> Result<Arc<Logger>, LookupError> {
        self.loggers
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LookupError::NotFound(name.to_owned()))
    }

    /// Whether a logger called `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.loggers.contains_key(name)
    }

    /// Removes and returns the logger called `name`.
    pub fn remove(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.remove(name).map(|(_, logger)| logger)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of registered loggers.
    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    /// Whether no logger is registered.
    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    /// Flushes every registered logger, returning the first failure.
    pub fn flush_all(&self) -> Result<(), SinkError> {
        // Collect first so no shard lock is held while sinks flush.
        let loggers: Vec<Arc<Logger>> = self
            .loggers
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        let mut first_error = None;
        for logger in loggers {
            if let Err(err) = logger.flush() {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Removes every logger.
    pub fn drop_all(&self) {
        self.loggers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger(name: &str) -> Arc<Logger> {
        Arc::new(Logger::builder(name).build().unwrap())
    }

    #[test]
    fn register_then_get() {
        let registry = Registry::new();
        registry.register(logger("net")).unwrap();
        assert_eq!(registry.get("net").unwrap().name(), "net");
        assert!(registry.contains("net"));
    }

    #[test]
    fn duplicate_registration_fails() {
        let registry = Registry::new();
        registry.register(logger("net")).unwrap();
        assert_eq!(
            registry.register(logger("net")),
            Err(RegistryError::Duplicate("net".to_owned()))
        );
    }

    #[test]
    fn missing_logger_is_not_found() {
        let registry = Registry::new();
        assert_eq!(
            registry.get("db").unwrap_err(),
            LookupError::NotFound("db".to_owned())
        );
    }

    #[test]
    fn names_are_sorted() {
        let registry = Registry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(logger(name)).unwrap();
        }
        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn remove_and_drop_all() {
        let registry = Registry::new();
        registry.register(logger("a")).unwrap();
        registry.register(logger("b")).unwrap();
        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        registry.drop_all();
        assert!(registry.is_empty());
    }

    #[test]
    fn flush_all_on_empty_registry() {
        assert!(Registry::new().flush_all().is_ok());
    }
}
