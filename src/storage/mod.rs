//! Durable key-value storage for the favorites snapshot
//!
//! The favorites store only needs to read and write one serialized blob
//! under a fixed key, so the contract is a plain async string map.
//! Two backends ship with the crate:
//!
//! - [`SqliteStore`] persists to a `SQLite` file (the default)
//! - [`MemoryStore`] keeps everything in process, with switchable read and
//!   write failures

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`] or while (de)serializing its contents
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or refused the operation
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// `SQLite` reported an error
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored value exists but cannot be decoded
    #[error("stored favorites are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// A value could not be encoded for storage
    #[error("failed to encode favorites: {0}")]
    Encode(#[source] serde_json::Error),

    /// The blocking storage task panicked or was cancelled
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Persistent, asynchronous string-keyed storage
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
