//! In-process key/value store.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{KeyValueStore, StorageError, StorageKey};

/// Keeps values in memory. Can be switched into a failing mode where every
/// read and write errors, to exercise best-effort persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<StorageKey, String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: StorageKey, value: impl Into<String>) -> Self {
        self.values.borrow_mut().insert(key, value.into());
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Raw stored value, bypassing the failing mode.
    pub fn raw(&self, key: StorageKey) -> Option<String> {
        self.values.borrow().get(&key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        if self.failing.get() {
            return Err(StorageError::Unavailable(format!("cannot read {}", key)));
        }
        Ok(self.values.borrow().get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::Unavailable(format!("cannot write {}", key)));
        }
        self.values.borrow_mut().insert(key, value.to_string());
        Ok(())
    }
}
