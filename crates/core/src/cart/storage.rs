//! Key-value slot storage backing the cart.
//!
//! A slot is a named string value, the equivalent of one browser
//! `localStorage` entry. [`CartStore`](super::CartStore) is generic over the
//! backend so tests can inject [`MemoryStorage`] while the storefront uses a
//! file-backed implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors returned by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The slot key cannot be used by this backend.
    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),

    /// The value does not fit in the backend's quota.
    #[error("Quota exceeded: {attempted} bytes (limit {limit})")]
    QuotaExceeded { limit: usize, attempted: usize },

    /// The backend cannot be used right now.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A set of named string slots.
pub trait SlotStorage: Send + Sync {
    /// Read a slot. Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be stored.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Removing a missing slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: SlotStorage + ?Sized> SlotStorage for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process slot storage.
///
/// An optional per-value byte quota makes writes fail the way a full
/// browser storage area does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects values longer than `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            slots: Mutex::default(),
            quota: Some(limit),
        }
    }

    fn slots(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.slots
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota
            && value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                limit,
                attempted: value.len(),
            });
        }
        self.slots()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_read_write_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("cart").unwrap(), None);

        storage.write("cart", "[]").unwrap();
        assert_eq!(storage.read("cart").unwrap().as_deref(), Some("[]"));

        storage.remove("cart").unwrap();
        storage.remove("cart").unwrap();
        assert_eq!(storage.read("cart").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_quota() {
        let storage = MemoryStorage::with_quota(4);
        storage.write("k", "1234").unwrap();

        let err = storage.write("k", "12345").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                limit: 4,
                attempted: 5
            }
        ));
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_shared_storage_through_arc() {
        let storage: Arc<dyn SlotStorage> = Arc::new(MemoryStorage::new());
        let other = Arc::clone(&storage);
        storage.write("cart", "x").unwrap();
        assert_eq!(other.read("cart").unwrap().as_deref(), Some("x"));
    }
}
