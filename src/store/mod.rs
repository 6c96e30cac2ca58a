//! Family-scoped in-memory object cache
//!
//! [`ScopedStore`] holds connection-lifetime values such as resolved service
//! handles. Keys are either supplied by the caller or generated as
//! `<size + 1>_store[_<family>]`; generated keys carrying a family can be
//! evicted together with [`ScopedStore::clear_family`].
//!
//! All operations take a single lock, so key generation always observes the
//! store size at the moment of the insert.

pub mod key;
pub mod value;

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use key::StoreKey;
pub use value::StoreValue;

#[derive(Debug, Default)]
pub struct ScopedStore {
    entries: Mutex<HashMap<StoreKey, StoreValue>>,
}

impl ScopedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` and return the key it was stored under.
    ///
    /// With `key_family` set, or with no usable `key`, a key is generated
    /// from the current size; a non-empty `key` then becomes the family tag.
    /// Otherwise `key` is used verbatim.
    ///
    /// Generated sequence numbers come from the size, not a counter, so after
    /// removals a generated key can coincide with a live entry and replace it.
    pub fn insert(
        &self,
        key: Option<&str>,
        key_family: bool,
        value: impl Into<StoreValue>,
    ) -> String {
        let key = key.filter(|k| !k.is_empty());
        let mut entries = self.entries.lock();

        let store_key = match key {
            Some(raw) if !key_family => StoreKey::parse(raw),
            family => {
                let seq = entries.len() as u64 + 1;
                let generated = StoreKey::generated(seq, family);
                tracing::trace!(key = %generated, "Generated store key");
                generated
            }
        };

        let rendered = store_key.to_string();
        if entries.insert(store_key, value.into()).is_some() {
            tracing::debug!(key = %rendered, "Replaced existing store entry");
        }
        rendered
    }

    /// Serialize `value` to JSON and store it like [`insert`](Self::insert)
    pub fn insert_serialized<T: Serialize>(
        &self,
        key: Option<&str>,
        key_family: bool,
        value: &T,
    ) -> Result<String, serde_json::Error> {
        let json = serde_json::to_value(value)?;
        Ok(self.insert(key, key_family, StoreValue::Json(json)))
    }

    pub fn get(&self, key: &str) -> Option<StoreValue> {
        self.entries.lock().get(&StoreKey::parse(key)).cloned()
    }

    /// Read the entry under `key` back as `T`
    pub fn get_deserialized<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, serde_json::Error> {
        match self.get(key) {
            Some(value) => serde_json::from_value(value.to_json()).map(Some),
            None => Ok(None),
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.entries.lock().contains_key(&StoreKey::parse(key))
    }

    /// Delete the entry under `key`, returning its value
    pub fn remove(&self, key: &str) -> Option<StoreValue> {
        self.entries.lock().remove(&StoreKey::parse(key))
    }

    /// Remove every generated entry tagged with `family`, except `keep_keys`.
    ///
    /// Keys without the generated shape are never touched. Returns the number
    /// of entries removed.
    pub fn clear_family(&self, family: &str, keep_keys: &[&str]) -> usize {
        let keep: HashSet<StoreKey> = keep_keys.iter().map(|k| StoreKey::parse(k)).collect();
        let mut entries = self.entries.lock();
        let before = entries.len();

        entries.retain(|key, _| !key.matches_family(family) || keep.contains(key));

        let removed = before - entries.len();
        tracing::debug!(family, removed, kept = keep.len(), "Cleared store family");
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().keys().map(ToString::to_string).collect();
        keys.sort();
        keys
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
