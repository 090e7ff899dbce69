use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use tracing::{Level, event};

/// String valued key-value persistence, modelled after browser local storage
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read the raw value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// JSON helpers available on every [`KeyValueStore`]
pub trait JsonStoreExt {
    /// Read and parse the value under `key`
    ///
    /// Read and parse failures are logged and treated as empty state
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T>;

    /// Serialize `value` and write it under `key`
    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()>;

    /// Read a JSON array, returning an empty vector for missing or broken values
    fn read_json_vec<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read_json::<Vec<T>>(key).unwrap_or_default()
    }
}

impl<S: KeyValueStore + ?Sized> JsonStoreExt for S {
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                event!(Level::ERROR, "Error reading {key}: {e:?}");
                return None;
            }
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                event!(Level::ERROR, "Error parsing {key}: {e:?}");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::MemoryStore;

    #[test]
    fn test_broken_json_is_empty_state() -> Result<()> {
        let store = MemoryStore::new();
        store.set_item("users", "{not json")?;
        assert!(store.read_json::<Vec<String>>("users").is_none());
        assert!(store.read_json_vec::<String>("users").is_empty());
        assert!(store.read_json_vec::<String>("missing").is_empty());
        Ok(())
    }

    #[test]
    fn test_write_then_read_through_trait_object() -> Result<()> {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.write_json("numbers", &vec![1, 2, 3])?;
        assert_eq!(store.read_json_vec::<u32>("numbers"), [1, 2, 3]);
        Ok(())
    }
}
