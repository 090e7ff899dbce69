use anyhow::Result;
use parking_lot::RwLock;

use super::key_value::KeyValueStore;
use crate::common::collections::HashMap;

/// Volatile store used for tests and throw-away sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() -> Result<()> {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set_item("user", "{}")?;
        assert_eq!(store.get_item("user")?.as_deref(), Some("{}"));
        store.set_item("user", "[]")?;
        assert_eq!(store.get_item("user")?.as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);
        store.remove_item("user")?;
        store.remove_item("user")?;
        assert!(store.get_item("user")?.is_none());
        Ok(())
    }
}
