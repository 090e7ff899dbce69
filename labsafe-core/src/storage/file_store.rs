use anyhow::{Result, anyhow};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::instrument;

use super::key_value::KeyValueStore;

/// Store that keeps one `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store, creating the directory when needed
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!("Opened file store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.contains("..")
            || key.contains('/')
            || key.contains('\\')
            || key.contains('\0')
        {
            return Err(anyhow!("Invalid storage key {key:?}"));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(level = "trace")]
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(level = "trace", skip(value))]
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // each writer gets its own file next to the target, renamed into place
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    #[instrument(level = "trace")]
    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::key_value::JsonStoreExt;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_persists_between_instances() -> Result<()> {
        let tmp_dir = tempdir()?;
        let store = FileStore::open(tmp_dir.path().join("data"))?;
        store.write_json("user_plan_user_1", &serde_json::json!({"planId": "premium"}))?;
        assert!(tmp_dir.path().join("data/user_plan_user_1.json").exists());

        let reopened = FileStore::open(tmp_dir.path().join("data"))?;
        let value: serde_json::Value = reopened.read_json("user_plan_user_1").unwrap();
        assert_eq!(value["planId"], "premium");

        reopened.remove_item("user_plan_user_1")?;
        assert!(reopened.get_item("user_plan_user_1")?.is_none());
        reopened.remove_item("user_plan_user_1")?;
        tmp_dir.close()?;
        Ok(())
    }

    #[test]
    fn test_file_store_concurrent_writers() -> Result<()> {
        let tmp_dir = tempdir()?;
        let store = FileStore::open(tmp_dir.path())?;
        std::thread::scope(|scope| {
            for writer in 0..8 {
                let store = &store;
                scope.spawn(move || {
                    for round in 0..25 {
                        let value = serde_json::json!({"writer": writer, "round": round});
                        assert!(store.write_json("user", &value).is_ok());
                    }
                });
            }
        });

        // the last write wins whole and no temporary files are left behind
        let value: serde_json::Value = store.read_json("user").unwrap();
        assert_eq!(value["round"], 24);
        assert_eq!(std::fs::read_dir(tmp_dir.path())?.count(), 1);
        tmp_dir.close()?;
        Ok(())
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() -> Result<()> {
        let tmp_dir = tempdir()?;
        let store = FileStore::open(tmp_dir.path())?;
        assert!(store.set_item("../escape", "x").is_err());
        assert!(store.get_item("a/b").is_err());
        assert!(store.set_item("", "x").is_err());
        tmp_dir.close()?;
        Ok(())
    }
}
