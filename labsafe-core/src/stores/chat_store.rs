use anyhow::{Result, anyhow};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::models::{chat_session::ChatSession, message::Message};
use crate::storage::{
    key_value::{JsonStoreExt, KeyValueStore},
    storage_keys::user_chats_key,
};

/// Chat history kept under `user_chats_<userId>`
#[derive(Debug)]
pub struct ChatStore {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl ChatStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Sessions in creation order; the last one is the most recent
    pub fn list_sessions(&self, user_id: &str) -> Vec<ChatSession> {
        self.store.read_json_vec(&user_chats_key(user_id))
    }

    pub fn get_session(&self, user_id: &str, chat_id: &str) -> Option<ChatSession> {
        self.list_sessions(user_id)
            .into_iter()
            .find(|chat| chat.id == chat_id)
    }

    /// Append messages to a session, starting a new one when `chat_id` is `None`
    pub fn append_messages(
        &self,
        user_id: &str,
        chat_id: Option<&str>,
        messages: Vec<Message>,
    ) -> Result<ChatSession> {
        let _guard = self.write_lock.lock();
        let key = user_chats_key(user_id);
        let mut sessions: Vec<ChatSession> = self.store.read_json_vec(&key);

        let session = match chat_id {
            Some(chat_id) => {
                let session = sessions
                    .iter_mut()
                    .find(|chat| chat.id == chat_id)
                    .ok_or_else(|| anyhow!("Chat {chat_id} not found for user {user_id}"))?;
                session.append(messages);
                session.clone()
            }
            None => {
                let session = ChatSession::new(messages);
                tracing::debug!("Creating chat {} for user {user_id}", session.id);
                sessions.push(session.clone());
                session
            }
        };

        self.store.write_json(&key, &sessions)?;
        Ok(session)
    }

    /// Delete a session, returning whether it existed
    pub fn delete_session(&self, user_id: &str, chat_id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock();
        let key = user_chats_key(user_id);
        let mut sessions: Vec<ChatSession> = self.store.read_json_vec(&key);
        let before = sessions.len();
        sessions.retain(|chat| chat.id != chat_id);
        if sessions.len() == before {
            return Ok(false);
        }
        self.store.write_json(&key, &sessions)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::MemoryStore;

    #[test]
    fn test_append_creates_then_extends_session() -> Result<()> {
        let chats = ChatStore::new(Arc::new(MemoryStore::new()));
        let created = chats.append_messages(
            "user_1",
            None,
            vec![Message::new_user("Как оформить несчастный случай?")],
        )?;
        assert_eq!(created.messages.len(), 1);

        let updated = chats.append_messages(
            "user_1",
            Some(&created.id),
            vec![Message::new_assistant("Расследование проводит комиссия", Vec::new())],
        )?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.messages.len(), 2);
        assert_eq!(updated.title, created.title);

        let sessions = chats.list_sessions("user_1");
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0], updated);
        assert!(chats.list_sessions("user_2").is_empty());
        Ok(())
    }

    #[test]
    fn test_append_to_unknown_chat_fails() {
        let chats = ChatStore::new(Arc::new(MemoryStore::new()));
        let result = chats.append_messages("user_1", Some("chat_missing"), Vec::new());
        assert!(result.is_err());
        assert!(chats.list_sessions("user_1").is_empty());
    }

    #[test]
    fn test_delete_session() -> Result<()> {
        let chats = ChatStore::new(Arc::new(MemoryStore::new()));
        let first = chats.append_messages("user_1", None, vec![Message::new_user("СИЗ")])?;
        let second = chats.append_messages("user_1", None, vec![Message::new_user("СОУТ")])?;
        assert!(chats.delete_session("user_1", &first.id)?);
        assert!(!chats.delete_session("user_1", &first.id)?);
        assert_eq!(chats.list_sessions("user_1"), vec![second.clone()]);
        assert_eq!(chats.get_session("user_1", &second.id), Some(second));
        Ok(())
    }
}
