use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{Result, StorageError};
use crate::traits::KeyValueStorage;

/// In-memory storage for tests and ephemeral sessions. Not durable.
///
/// An optional quota (bytes of keys plus values) mimics the browser's
/// storage limit so that write failures can be exercised.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    items: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl Inner {
    fn used_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(limit_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(Inner { items: BTreeMap::new(), quota: Some(limit_bytes) }),
        }
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.lock()?;
        Ok(inner.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.lock()?;
        if let Some(limit) = inner.quota {
            if inner.used_without(key) + key.len() + value.len() > limit {
                return Err(StorageError::QuotaExceeded { key: key.to_string(), limit });
            }
        }
        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.lock()?;
        inner.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let inner = self.inner.lock()?;
        Ok(inner.items.keys().cloned().collect())
    }

    fn clear(&self) -> Result<()> {
        let mut inner = self.inner.lock()?;
        inner.items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty_storage() {
        let storage = InMemoryStorage::new();
        assert!(storage.keys().unwrap().is_empty());
        assert_eq!(storage.get_item("NTD_TOKEN").unwrap(), None);
    }

    #[test]
    fn test_set_and_get_item() {
        let storage = InMemoryStorage::new();
        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_remove_item() {
        let storage = InMemoryStorage::new();
        storage.set_item("k", "v").unwrap();
        storage.remove_item("k").unwrap();
        storage.remove_item("missing").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let storage = InMemoryStorage::new();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        storage.clear().unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let storage = InMemoryStorage::with_quota(10);
        storage.set_item("key", "1234567").unwrap();
        let err = storage.set_item("other", "x").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { ref key, limit: 10 } if key == "other"));
        assert_eq!(storage.get_item("other").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_overwrite_once() {
        let storage = InMemoryStorage::with_quota(10);
        storage.set_item("key", "1234567").unwrap();
        storage.set_item("key", "7654321").unwrap();
        assert_eq!(storage.get_item("key").unwrap().as_deref(), Some("7654321"));
    }
}
