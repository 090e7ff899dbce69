use labsafe_core::models::{message::Reference, user::UserRole};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::role_filter::adapt_to_role;
use crate::knowledge::knowledge_item::KnowledgeItem;

/// Reply used when nothing relevant survives the role filter
pub const NOT_FOUND_RESPONSE: &str = "К сожалению, я не нашел точной информации по вашему запросу. Пожалуйста, уточните ваш вопрос или обратитесь к специалисту по охране труда.";

/// Heading that separates the main answer from related topics
pub const ADDITIONAL_INFO_HEADING: &str = "\n\nДополнительная информация:\n\n";

/// Number of related topics appended after the main answer
const MAX_ADDITIONAL_ITEMS: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub text: String,
    pub references: Vec<Reference>,
}

/// Compose the reply from the matched items for the given role
pub fn generate_response(matches: &[Arc<KnowledgeItem>], role: UserRole) -> AssistantResponse {
    let relevant = adapt_to_role(matches, role);

    let text = match relevant.split_first() {
        Some((first, rest)) => {
            let mut text = first.content.clone();
            if !rest.is_empty() {
                text.push_str(ADDITIONAL_INFO_HEADING);
                text.push_str(
                    &rest
                        .iter()
                        .take(MAX_ADDITIONAL_ITEMS)
                        .map(|item| format!("{}: {}", item.title, item.summary))
                        .collect::<Vec<_>>()
                        .join("\n\n"),
                );
            }
            text
        }
        None => NOT_FOUND_RESPONSE.to_string(),
    };

    let references = relevant
        .iter()
        .map(|item| Reference {
            title: item.title.clone(),
            url: item.source.clone(),
            description: item.summary.clone(),
        })
        .collect();

    AssistantResponse { text, references }
}
