//! In-process key-value store

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{KeyValueStore, StorageError};

#[derive(Debug, Default)]
struct Inner {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

/// Volatile key-value store.
///
/// Clones share the same entries, so a caller can keep a clone to inspect
/// what another owner wrote. Reads and writes can be switched to fail,
/// which is how the favorites rollback path is exercised.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.put(key, value);
        store
    }

    /// Make every subsequent `get` fail (or succeed again)
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set`/`remove` fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Peek at a value without going through the async contract
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries().ok()?.get(key).cloned()
    }

    /// Write a value directly, ignoring injected failures
    pub fn put(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.inner
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn check_writes(&self) -> Result<(), StorageError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("write rejected".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("read rejected".to_string()));
        }
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writes()?;
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writes()?;
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        block_on(store.set("k", "v")).unwrap();
        assert_eq!(other.value("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_injected_failures() {
        let store = MemoryStore::with_entry("k", "v");

        store.set_fail_writes(true);
        assert!(block_on(store.set("k", "w")).is_err());
        assert!(block_on(store.remove("k")).is_err());
        assert_eq!(store.value("k").as_deref(), Some("v"));

        store.set_fail_reads(true);
        assert!(matches!(
            block_on(store.get("k")),
            Err(StorageError::Unavailable(_))
        ));

        store.set_fail_reads(false);
        assert_eq!(block_on(store.get("k")).unwrap().as_deref(), Some("v"));
    }
}
