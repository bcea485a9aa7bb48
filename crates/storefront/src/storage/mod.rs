//! Local key-value storage.
//!
//! The cart keeps its durable copy in a [`KeyValueStore`]: one string value
//! per key, read once at startup and overwritten on every change.
//!
//! - [`MemoryStore`] - process-local map, used in tests
//! - [`FileStore`] - one `<key>.json` file per key in a data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("{context} ({path}): {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped to a storage location.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Encoding the value to store failed.
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string-to-string store with whole-value overwrites.
///
/// Implementations must make `set` visible to a later `get` on the same key,
/// including across process restarts for durable backends.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read. A missing key is
    /// `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write does not complete.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
