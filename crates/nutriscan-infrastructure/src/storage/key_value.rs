//! String-keyed slot storage.

use std::collections::HashMap;
use std::sync::Mutex;

use nutriscan_core::error::{NutriscanError, Result};

/// Update callback for [`KeyValueStore::update`]: receives the current value
/// and returns the value to store.
pub type UpdateFn<'a> = &'a mut dyn FnMut(Option<String>) -> Result<String>;

/// A durable, process-local key-value store holding string values.
///
/// Models the single-slot persistence a browser profile offers: no
/// cross-device sync, no versioning.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Atomic read-modify-write of one slot.
    fn update(&self, key: &str, f: UpdateFn<'_>) -> Result<()>;
}

/// In-memory store, used where no durable location is wanted.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| NutriscanError::internal(format!("Store lock poisoned: {}", e)))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn update(&self, key: &str, f: UpdateFn<'_>) -> Result<()> {
        let mut entries = self.entries()?;
        let updated = f(entries.get(key).cloned())?;
        entries.insert(key.to_string(), updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }

    #[test]
    fn test_update_sees_previous_value() {
        let store = MemoryKeyValueStore::new();
        store
            .update("n", &mut |current| {
                assert!(current.is_none());
                Ok("1".to_string())
            })
            .unwrap();
        store
            .update("n", &mut |current| {
                let n: u32 = current.unwrap().parse().unwrap();
                Ok((n + 1).to_string())
            })
            .unwrap();
        assert_eq!(store.get("n").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_failed_update_leaves_value() {
        let store = MemoryKeyValueStore::new();
        store.set("k", "before").unwrap();
        let result = store.update("k", &mut |_| Err(NutriscanError::internal("boom")));
        assert!(result.is_err());
        assert_eq!(store.get("k").unwrap(), Some("before".to_string()));
    }
}
