//! Target configuration store.
//!
//! The loader writes into a [`PropertyStore`] handed to it at construction.
//! [`MemoryStore`] is the shipped implementation. [`system_properties`] gives
//! the process-wide instance a host would normally pass in.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// A string-keyed key/value store shared with other writers.
pub trait PropertyStore: Send + Sync {
    /// Current value of `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// True if `key` is present with a non-empty value.
    fn has_non_empty(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Copy of every entry, sorted by key.
    fn snapshot(&self) -> BTreeMap<String, String>;
}

/// Concurrent in-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.inner.remove(key).map(|(_, v)| v)
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let store = Self::new();
        for (k, v) in iter {
            store.inner.insert(k.into(), v.into());
        }
        store
    }
}

impl PropertyStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), value.to_string());
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }
}

/// Process-wide property store.
pub fn system_properties() -> &'static MemoryStore {
    static SYSTEM: OnceLock<MemoryStore> = OnceLock::new();
    SYSTEM.get_or_init(MemoryStore::new)
}
