//! Key-value store trait and error types
//!
//! The history log is a single JSON value under a namespace key, so the
//! backends only need to read, overwrite and remove one string per key.

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable string values addressed by key
///
/// Implementations must be `Send` so the controller can hold them behind a
/// mutex shared across tasks.
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`, `None` if absent
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    fn save(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`; removing an absent key is not an error
    fn clear(&mut self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).save(key, value)
    }

    fn clear(&mut self, key: &str) -> StorageResult<()> {
        (**self).clear(key)
    }
}
