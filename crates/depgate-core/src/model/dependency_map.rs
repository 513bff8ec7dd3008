use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version recorded for a dependency declared without a pin
pub const UNPINNED_VERSION: &str = "0.0";

/// Canonical dependency set: name → version specifier
///
/// Backed by a `BTreeMap` so that equality is set-of-pairs equality and
/// serialization is deterministic regardless of declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DependencyMap {
    entries: BTreeMap<String, String>,
}

impl DependencyMap {
    /// Create a new empty map
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or replace a dependency, returning the previous version
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), version.into())
    }

    /// Get the version recorded for a dependency
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Check if a dependency is declared
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate over `(name, version)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get the number of dependencies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no dependencies are declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, String>> for DependencyMap {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for DependencyMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, version) in iter {
            map.insert(name, version);
        }
        map
    }
}
