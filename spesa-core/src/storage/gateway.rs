//! Persistence gateway: typed, best-effort access to the key/value store.
//!
//! Reads happen once at startup and fall back to defaults; writes are
//! fire-and-forget. Failures are logged and never reach the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{KeyValueStore, StorageKey};

pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decode the value under `key`, or `T::default()` if it is missing,
    /// unreadable or malformed.
    pub fn load<T: DeserializeOwned + Default>(&self, key: StorageKey) -> T {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    tracing::debug!("Loaded {}", key);
                    value
                }
                Err(e) => {
                    tracing::warn!("Failed to decode {}: {}", key, e);
                    T::default()
                }
            },
            Ok(None) => {
                tracing::debug!("No stored value for {}, using default", key);
                T::default()
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", key, e);
                T::default()
            }
        }
    }

    /// Encode and write `value` under `key`. Errors are logged and dropped.
    pub fn save<T: Serialize>(&self, key: StorageKey, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to encode {}: {}", key, e);
                return;
            }
        };

        match self.store.set(key, &raw) {
            Ok(()) => tracing::debug!("Saved {} ({} bytes)", key, raw.len()),
            Err(e) => tracing::warn!("Failed to save {}: {}", key, e),
        }
    }
}
