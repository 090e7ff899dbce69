use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::models::document::DocumentData;
use crate::storage::{
    key_value::{JsonStoreExt, KeyValueStore},
    storage_keys::user_documents_key,
};

/// Saved documents kept under `user_documents_<userId>`
#[derive(Debug)]
pub struct DocumentStore {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn list_documents(&self, user_id: &str) -> Vec<DocumentData> {
        self.store.read_json_vec(&user_documents_key(user_id))
    }

    /// Append a document; documents are never updated in place
    pub fn save_document(&self, user_id: &str, document: DocumentData) -> Result<DocumentData> {
        let _guard = self.write_lock.lock();
        let key = user_documents_key(user_id);
        let mut documents: Vec<DocumentData> = self.store.read_json_vec(&key);
        documents.push(document.clone());
        self.store.write_json(&key, &documents)?;
        tracing::debug!(
            "Saved document {} for user {user_id} ({} total)",
            document.id,
            documents.len()
        );
        Ok(document)
    }

    /// Number of documents created at or after `since`
    pub fn count_documents_since(&self, user_id: &str, since: DateTime<Utc>) -> u32 {
        self.list_documents(user_id)
            .iter()
            .filter(|doc| doc.created_at >= since)
            .count() as u32
    }
}
