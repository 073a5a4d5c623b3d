//! In-memory key-value store

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::KeyValueStore;
use crate::error::{Error, Result};

/// Process-local store, used as a fake in tests and for throwaway sessions.
///
/// Can be switched into an unavailable state to mimic storage that has been
/// disabled or has run out of quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    unavailable: Cell<bool>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with `StorageUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.get() {
            Err(Error::StorageUnavailable(
                "in-memory store is disabled".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_available()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_unavailable_store_fails_every_operation() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        store.set_unavailable(true);

        assert!(matches!(store.get("k"), Err(Error::StorageUnavailable(_))));
        assert!(matches!(store.set("k", "w"), Err(Error::StorageUnavailable(_))));
        assert!(matches!(store.remove("k"), Err(Error::StorageUnavailable(_))));

        store.set_unavailable(false);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
