use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source attached to an assistant answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
    pub description: String,
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Pdf,
    Doc,
    Image,
    Link,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
}

/// A single chat message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

/// Create a new message id
pub fn create_message_id() -> String {
    format!("msg_{}", uuid::Uuid::new_v4().simple())
}

impl Message {
    /// Message typed by the user
    pub fn new_user(content: &str) -> Self {
        Self {
            id: create_message_id(),
            content: content.to_string(),
            is_user: true,
            timestamp: Utc::now(),
            references: None,
            attachments: None,
        }
    }

    /// Message produced by the assistant
    pub fn new_assistant(content: &str, references: Vec<Reference>) -> Self {
        Self {
            id: create_message_id(),
            content: content.to_string(),
            is_user: false,
            timestamp: Utc::now(),
            references: if references.is_empty() {
                None
            } else {
                Some(references)
            },
            attachments: None,
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_assistant_message_skips_empty_references() -> Result<()> {
        let message = Message::new_assistant("Ответ", Vec::new());
        assert!(!message.is_user);
        let json = serde_json::to_value(&message)?;
        assert!(json.get("references").is_none());
        assert_eq!(json["isUser"], false);
        Ok(())
    }

    #[test]
    fn test_attachment_kind_uses_type_key() -> Result<()> {
        let message = Message::new_user("Вопрос").with_attachments(vec![Attachment {
            name: "Приказ.pdf".to_string(),
            url: "/files/prikaz.pdf".to_string(),
            kind: AttachmentKind::Pdf,
        }]);
        let json = serde_json::to_value(&message)?;
        assert_eq!(json["attachments"][0]["type"], "pdf");
        let back: Message = serde_json::from_value(json)?;
        assert_eq!(back, message);
        Ok(())
    }
}
