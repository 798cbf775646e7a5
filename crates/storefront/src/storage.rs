//! Browser-local style persistent key/value cache.
//!
//! The cache is a mirror, never a second source of truth: on startup a
//! store seeds itself from its key, and from then on the in-memory state is
//! authoritative and every mutation re-writes the key. Failures degrade
//! silently to in-memory operation; callers log and continue.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Cache keys, stable across sessions.
pub mod keys {
    /// Key for the serialized cart line sequence.
    pub const CART: &str = "cart_items";

    /// Key for the cached user identity.
    pub const USER: &str = "user_info";

    /// Key for an auth token. Reserved; not populated by any current flow.
    pub const AUTH_TOKEN: &str = "auth_token";
}

/// Errors that can occur when accessing the cache.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cached value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The backing store was poisoned by a panicking writer.
    #[error("cache lock poisoned")]
    Poisoned,
}

/// A persistent key/value store holding JSON-serialized values.
///
/// Get/set/remove by key. Implementations are cheap to clone and clones
/// share the same backing store, so several components can write through to
/// one cache. Last writer wins; writes are confined to a single session.
pub trait KeyValueStore: Clone {
    /// Read and deserialize the value at `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unavailable or the cached
    /// value is malformed.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>;

    /// Serialize `value` and write it at `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unavailable.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>;

    /// Delete the entry at `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unavailable.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed cache: one JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a file store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        fs::write(self.path_for(key), raw)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory cache for tests and degraded operation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw (possibly malformed) string at `key`.
    ///
    /// Lets tests simulate a corrupted cache entry.
    pub fn set_raw(&self, key: &str, raw: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), raw.to_owned());
        }
    }

    /// Whether any value is stored at `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }
}

impl KeyValueStore for MemoryStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        match entries.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), raw);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tahadu_core::{Cart, CartLine, VariantId};

    use rust_decimal::Decimal;

    fn sample_cart() -> Cart {
        Cart::new().with_line(CartLine {
            product_id: VariantId::from("golden-aqsa"),
            display_name: "ذهبي القدس".to_owned(),
            unit_price: Decimal::from(350),
            quantity: 2,
        })
    }

    #[test]
    fn memory_store_round_trips_a_cart() {
        let store = MemoryStore::new();
        store.set(keys::CART, &sample_cart()).unwrap();
        let reloaded: Cart = store.get(keys::CART).unwrap().unwrap();
        assert_eq!(reloaded, sample_cart());
    }

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::new();
        let value: Option<Cart> = store.get(keys::CART).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn malformed_value_is_an_error_not_a_panic() {
        let store = MemoryStore::new();
        store.set_raw(keys::CART, "{not json");
        let result: Result<Option<Cart>, _> = store.get(keys::CART);
        assert!(matches!(result, Err(StorageError::Serde(_))));
    }

    #[test]
    fn remove_deletes_the_key_itself() {
        let store = MemoryStore::new();
        store.set(keys::CART, &sample_cart()).unwrap();
        store.remove(keys::CART).unwrap();
        assert!(!store.contains(keys::CART));
        // Removing again is fine.
        store.remove(keys::CART).unwrap();
    }

    #[test]
    fn clones_share_the_backing_store() {
        let store = MemoryStore::new();
        let clone = store.clone();
        clone.set(keys::USER, &"01098765432").unwrap();
        let seen: Option<String> = store.get(keys::USER).unwrap();
        assert_eq!(seen.as_deref(), Some("01098765432"));
    }

    #[test]
    fn file_store_round_trips_across_instances() {
        let dir = std::env::temp_dir().join(format!("tahadu-test-{}", std::process::id()));
        let store = FileStore::open(&dir).unwrap();
        store.set(keys::CART, &sample_cart()).unwrap();

        // A fresh instance over the same directory sees the value.
        let reopened = FileStore::open(&dir).unwrap();
        let reloaded: Cart = reopened.get(keys::CART).unwrap().unwrap();
        assert_eq!(reloaded, sample_cart());

        store.remove(keys::CART).unwrap();
        let gone: Option<Cart> = reopened.get(keys::CART).unwrap();
        assert!(gone.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
