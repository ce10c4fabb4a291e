//! Typed storage wrapper with automatic serialization.

use crate::{FileStore, KeyValueStore, KvError, MemoryStore};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Type-safe local storage over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct LocalStorage<B> {
    backend: B,
}

impl LocalStorage<MemoryStore> {
    /// Storage backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl LocalStorage<FileStore> {
    /// Open file-backed storage rooted at `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let storage = LocalStorage::open_dir("~/.local/share/boutique")?;
    /// ```
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, KvError> {
        Ok(Self::new(FileStore::open(dir)?))
    }
}

impl<B: KeyValueStore> LocalStorage<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Get a value from storage.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`KvError::SerializeError`] if the stored bytes don't parse as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<LineItem>> = storage.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, KvError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in storage, overwriting prior content.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// storage.set("cart", &items)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), KvError> {
        let bytes = serde_json::to_vec(value)?;
        tracing::trace!(key, bytes = bytes.len(), "writing storage entry");
        self.backend.set(key, &bytes)
    }

    /// Delete a value from storage.
    pub fn delete(&self, key: &str) -> Result<(), KvError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in storage.
    pub fn exists(&self, key: &str) -> Result<bool, KvError> {
        self.backend.exists(key)
    }

    /// Get all keys in storage.
    pub fn keys(&self) -> Result<Vec<String>, KvError> {
        self.backend.keys()
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume and return the underlying backend.
    pub fn into_inner(self) -> B {
        self.backend
    }
}

/// Helper to build storage keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = storage_key!("guest", "cart");
/// // Returns "guest:cart"
/// ```
#[macro_export]
macro_rules! storage_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        quantity: i64,
    }

    #[test]
    fn test_typed_round_trip() {
        let storage = LocalStorage::in_memory();
        let entries = vec![Entry {
            name: "tee".to_string(),
            quantity: 2,
        }];

        storage.set("cart", &entries).unwrap();
        let loaded: Option<Vec<Entry>> = storage.get("cart").unwrap();
        assert_eq!(loaded, Some(entries));
    }

    #[test]
    fn test_missing_key_is_none() {
        let storage = LocalStorage::in_memory();
        let loaded: Option<Vec<Entry>> = storage.get("cart").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_value_is_serialize_error() {
        let storage = LocalStorage::in_memory();
        storage.backend().set("cart", b"{not json").unwrap();

        let result: Result<Option<Vec<Entry>>, _> = storage.get("cart");
        assert!(matches!(result, Err(KvError::SerializeError(_))));
    }

    #[test]
    fn test_open_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::open_dir(dir.path()).unwrap();
        storage.set("cart", &Vec::<Entry>::new()).unwrap();
        assert_eq!(storage.keys().unwrap(), vec!["cart"]);
    }

    #[test]
    fn test_storage_key_macro() {
        assert_eq!(storage_key!("guest", "cart"), "guest:cart");
        assert_eq!(storage_key!("user", 42, "cart"), "user:42:cart");
    }
}
