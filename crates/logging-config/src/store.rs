//! crates/logging-config/src/store.rs
//!
//! The [`ConfigStore`] key/value map and its merge rules.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::keys::{DEFAULTS, LOGGER_NAMES_KEY};
use crate::parse::parse_entries;

/// String-keyed configuration map that always holds the built-in defaults.
///
/// Keys are kept sorted so [`ConfigStore::dump`] and iteration are stable.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "BTreeMap<String, String>"))]
#[cfg_attr(feature = "serde", serde(into = "BTreeMap<String, String>"))]
pub struct ConfigStore {
    entries: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Creates a store holding exactly the built-in defaults.
    pub fn defaults() -> Self {
        let entries = DEFAULTS
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        Self { entries }
    }

    /// Creates a store from `entries` with missing defaults backfilled.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = Self::defaults();
        store.replace(entries);
        store
    }

    /// Looks up `key`, then `fallback`.
    ///
    /// ```
    /// use logging_config::ConfigStore;
    ///
    /// let store = ConfigStore::defaults();
    /// assert_eq!(store.get("net_level", "root_logger_level").unwrap(), "debug");
    /// ```
    pub fn get(&self, key: &str, fallback: &str) -> ConfigResult<&str> {
        self.entries
            .get(key)
            .or_else(|| self.entries.get(fallback))
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingKey(key.to_owned()))
    }

    /// Looks up `key` without a fallback.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` when `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Merges `partial` into the store.
    ///
    /// Every key overwrites the current value except `custom_logger_names`,
    /// which is appended with a comma when a non-empty value already exists.
    /// Keys absent from `partial` are left untouched.
    pub fn update<I, K, V>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in partial {
            let key = key.into();
            let value = value.into();
            if key != LOGGER_NAMES_KEY {
                self.entries.insert(key, value);
                continue;
            }
            match self.entries.get_mut(LOGGER_NAMES_KEY) {
                Some(existing) if !existing.is_empty() => {
                    if !value.is_empty() {
                        existing.push(',');
                        existing.push_str(&value);
                    }
                }
                Some(existing) => *existing = value,
                None => {
                    self.entries.insert(key, value);
                }
            }
        }
    }

    /// Replaces the store's content with `full`, then backfills missing defaults.
    pub fn replace<I, K, V>(&mut self, full: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries = full
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.backfill_defaults();
    }

    /// Loads a configuration file, replacing the store on success.
    ///
    /// On error the store is left unchanged.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::read(path, source))?;
        self.load_entries(BufReader::new(file), path)
    }

    /// Loads configuration lines from any buffered reader.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> ConfigResult<()> {
        self.load_entries(reader, Path::new("<reader>"))
    }

    fn load_entries<R: BufRead>(&mut self, reader: R, origin: &Path) -> ConfigResult<()> {
        let entries = parse_entries(reader, origin)?;
        crate::trace::loaded(origin, entries.len());
        self.replace(entries);
        Ok(())
    }

    /// Renders every key and value, one `key = value` per line in key order.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of entries, defaults included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a store built through the public constructors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn backfill_defaults(&mut self) {
        for (key, value) in DEFAULTS {
            if !self.entries.contains_key(*key) {
                self.entries.insert((*key).to_owned(), (*value).to_owned());
            }
        }
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::defaults()
    }
}

impl fmt::Display for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl From<BTreeMap<String, String>> for ConfigStore {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<ConfigStore> for BTreeMap<String, String> {
    fn from(store: ConfigStore) -> Self {
        store.entries
    }
}

impl IntoIterator for ConfigStore {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
