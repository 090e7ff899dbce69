use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::Message;

/// Title used before the first message arrives
pub const NEW_CHAT_TITLE: &str = "Новый чат";

/// Number of characters of the first message kept in the title
const TITLE_LENGTH: usize = 30;

/// A conversation between a user and the assistant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derive the session title from the opening message
pub fn title_from_messages(messages: &[Message]) -> String {
    match messages.first() {
        Some(first) => {
            let head: String = first.content.chars().take(TITLE_LENGTH).collect();
            format!("{head}...")
        }
        None => NEW_CHAT_TITLE.to_string(),
    }
}

impl ChatSession {
    /// Start a new session from its first messages
    pub fn new(messages: Vec<Message>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("chat_{}", uuid::Uuid::new_v4().simple()),
            title: title_from_messages(&messages),
            messages,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append messages and touch `updated_at`
    pub fn append(&mut self, messages: Vec<Message>) {
        let was_empty = self.messages.is_empty();
        self.messages.extend(messages);
        if was_empty {
            self.title = title_from_messages(&self.messages);
        }
        self.updated_at = Utc::now();
    }
}
