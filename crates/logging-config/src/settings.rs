//! crates/logging-config/src/settings.rs
//!
//! Typed views over a [`ConfigStore`] for one logger or one file sink.
//!
//! Every per-name setting falls back to the corresponding root logger
//! (`root_logger_*`) or default file sink (`file_*`) key. The merge is
//! explicit: the per-name keys that exist are collected into an overrides
//! value and laid over the fallback settings.

use crate::error::{ConfigError, ConfigResult};
use crate::keys::{
    DEFAULT_FILE_SINK_NAME, FILE_FORCE_FLUSH_KEY, FILE_FULL_NAME_KEY, FILE_ROTATE_NUM_KEY,
    FILE_SIZE_KEY, LOGGER_ASYNC_KEY, LOGGER_FORMAT_KEY, LOGGER_LEVEL_KEY, LOGGER_NAMES_KEY,
    LOGGER_SINKS_KEY, ROOT_LOGGER_NAME, expand, parse_name_list,
};
use crate::store::ConfigStore;

/// Resolved settings for one logger.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoggerSettings {
    /// Registry name of the logger.
    pub name: String,
    /// Level name as configured; interpretation is left to the engine.
    pub level: String,
    /// Pattern string.
    pub format: String,
    /// Logical sink names in configuration order.
    pub sinks: Vec<String>,
    /// Whether records go through a background worker.
    pub is_async: bool,
}

/// Per-name values that replace the root logger's.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoggerOverrides {
    /// `<name>_level`, when present.
    pub level: Option<String>,
    /// `<name>_format`, when present.
    pub format: Option<String>,
    /// `<name>_sinks`, when present.
    pub sinks: Option<String>,
    /// `<name>_async`, when present.
    pub is_async: Option<String>,
}

impl LoggerOverrides {
    /// Collects the keys `store` holds for `name`.
    pub fn from_store(store: &ConfigStore, name: &str) -> Self {
        let lookup = |template: &str| store.value(&expand(template, name)).map(str::to_owned);
        Self {
            level: lookup(LOGGER_LEVEL_KEY),
            format: lookup(LOGGER_FORMAT_KEY),
            sinks: lookup(LOGGER_SINKS_KEY),
            is_async: lookup(LOGGER_ASYNC_KEY),
        }
    }
}

impl LoggerSettings {
    /// Resolves the settings of `name`, falling back to the root logger's keys.
    pub fn resolve(store: &ConfigStore, name: &str) -> ConfigResult<Self> {
        let root = Self::root(store)?;
        if name == ROOT_LOGGER_NAME {
            return Ok(root);
        }
        Ok(root.with_overrides(name, LoggerOverrides::from_store(store, name)))
    }

    fn root(store: &ConfigStore) -> ConfigResult<Self> {
        let require = |template: &str| {
            let key = expand(template, ROOT_LOGGER_NAME);
            store
                .value(&key)
                .map(str::to_owned)
                .ok_or(ConfigError::MissingKey(key))
        };
        Ok(Self {
            name: ROOT_LOGGER_NAME.to_owned(),
            level: require(LOGGER_LEVEL_KEY)?,
            format: require(LOGGER_FORMAT_KEY)?,
            sinks: split_sinks(&require(LOGGER_SINKS_KEY)?),
            is_async: require(LOGGER_ASYNC_KEY)? == "1",
        })
    }

    /// Returns these settings renamed to `name` with `overrides` applied.
    pub fn with_overrides(self, name: &str, overrides: LoggerOverrides) -> Self {
        Self {
            name: name.to_owned(),
            level: overrides.level.unwrap_or(self.level),
            format: overrides.format.unwrap_or(self.format),
            sinks: overrides
                .sinks
                .as_deref()
                .map_or(self.sinks, split_sinks),
            is_async: overrides
                .is_async
                .map_or(self.is_async, |value| value == "1"),
        }
    }
}

/// Sink names keep their configured order; only blanks are dropped.
fn split_sinks(list: &str) -> Vec<String> {
    let mut sinks: Vec<String> = Vec::new();
    for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        if !sinks.iter().any(|known| known == name) {
            sinks.push(name.to_owned());
        }
    }
    sinks
}

/// All logger names the store configures, root logger included.
pub fn logger_names(store: &ConfigStore) -> Vec<String> {
    let mut names = parse_name_list(store.value(LOGGER_NAMES_KEY).unwrap_or_default());
    if let Err(index) = names.binary_search_by(|name| name.as_str().cmp(ROOT_LOGGER_NAME)) {
        names.insert(index, ROOT_LOGGER_NAME.to_owned());
    }
    names
}

/// Resolved settings for one rotating file sink.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileSinkSettings {
    /// Logical sink name.
    pub name: String,
    /// Path without extension, as configured.
    pub full_name: String,
    /// Byte size that triggers rotation.
    pub max_size: u64,
    /// Number of history files kept.
    pub max_files: usize,
    /// Whether every record is flushed.
    pub force_flush: bool,
}

impl FileSinkSettings {
    /// Path of the sink named `sink`, falling back to `file_full_name`.
    ///
    /// Resolving only the path lets callers check a cache before any numeric
    /// setting is parsed.
    pub fn resolve_path(store: &ConfigStore, sink: &str) -> ConfigResult<String> {
        fallback_value(store, FILE_FULL_NAME_KEY, sink).map(str::to_owned)
    }

    /// Resolves every setting of the sink named `sink`.
    pub fn resolve(store: &ConfigStore, sink: &str) -> ConfigResult<Self> {
        Ok(Self {
            name: sink.to_owned(),
            full_name: Self::resolve_path(store, sink)?,
            max_size: parse_number(store, FILE_SIZE_KEY, sink)?,
            max_files: parse_number(store, FILE_ROTATE_NUM_KEY, sink)?,
            force_flush: fallback_value(store, FILE_FORCE_FLUSH_KEY, sink)? != "0",
        })
    }
}

fn fallback_value<'a>(store: &'a ConfigStore, template: &str, sink: &str) -> ConfigResult<&'a str> {
    store.get(
        &expand(template, sink),
        &expand(template, DEFAULT_FILE_SINK_NAME),
    )
}

fn parse_number<T: std::str::FromStr>(
    store: &ConfigStore,
    template: &str,
    sink: &str,
) -> ConfigResult<T> {
    let key = expand(template, sink);
    let key = if store.contains_key(&key) {
        key
    } else {
        expand(template, DEFAULT_FILE_SINK_NAME)
    };
    let value = store
        .value(&key)
        .ok_or_else(|| ConfigError::MissingKey(expand(template, sink)))?;
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_owned(),
        })
}
