//! Local key/value persistence.
//!
//! Three keys are stored independently (see [`StorageKey`]); there is no
//! transaction across keys, so each one recovers on its own to its last
//! successfully written value.

mod file;
mod gateway;
mod key;
mod memory;

use std::path::PathBuf;
use thiserror::Error;

pub use file::FileStore;
pub use gateway::Persistence;
pub use key::StorageKey;
pub use memory::MemoryStore;

/// String-keyed blob storage.
pub trait KeyValueStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError>;
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;
}

/// Errors that can occur reading or writing a key.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
