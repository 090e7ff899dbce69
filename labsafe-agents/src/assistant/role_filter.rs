use labsafe_core::models::user::UserRole;
use std::sync::Arc;

use crate::knowledge::knowledge_item::{KnowledgeCategory, KnowledgeItem};

/// Whether an item should be shown to a user with the given role
pub fn is_visible_to(item: &KnowledgeItem, role: UserRole) -> bool {
    match role {
        // full detail for labor-safety specialists and administrators
        UserRole::Specialist | UserRole::Admin => true,
        UserRole::Manager => {
            item.is_relevant_for(UserRole::Manager)
                || matches!(
                    item.category,
                    KnowledgeCategory::Responsibility | KnowledgeCategory::Organization
                )
        }
        UserRole::Hr => {
            item.is_relevant_for(UserRole::Hr)
                || matches!(
                    item.category,
                    KnowledgeCategory::Training | KnowledgeCategory::Documents
                )
        }
        UserRole::Employee => {
            item.is_relevant_for(UserRole::Employee)
                || item.category == KnowledgeCategory::SafetyRules
        }
    }
}

/// Keep the matches relevant to the role, preserving their order
pub fn adapt_to_role(items: &[Arc<KnowledgeItem>], role: UserRole) -> Vec<Arc<KnowledgeItem>> {
    items
        .iter()
        .filter(|item| is_visible_to(item, role))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: &str, category: KnowledgeCategory, relevant_for: &[UserRole]) -> Arc<KnowledgeItem> {
        Arc::new(KnowledgeItem {
            id: id.to_string(),
            title: id.to_string(),
            content: String::new(),
            summary: String::new(),
            source: String::new(),
            keywords: Vec::new(),
            category,
            relevant_for: relevant_for.to_vec(),
            sections: Vec::new(),
        })
    }

    fn filtered_ids(items: &[Arc<KnowledgeItem>], role: UserRole) -> Vec<String> {
        adapt_to_role(items, role)
            .iter()
            .map(|item| item.id.clone())
            .collect()
    }

    #[test]
    fn test_role_predicates() {
        let items = vec![
            make_item("liability", KnowledgeCategory::Responsibility, &[]),
            make_item("suot", KnowledgeCategory::Organization, &[]),
            make_item("training", KnowledgeCategory::Training, &[]),
            make_item("docs", KnowledgeCategory::Documents, &[]),
            make_item("ppe", KnowledgeCategory::SafetyRules, &[]),
            make_item("law", KnowledgeCategory::Legislation, &[UserRole::Manager]),
            make_item("standard", KnowledgeCategory::SafetyStandards, &[UserRole::Specialist]),
        ];

        assert_eq!(filtered_ids(&items, UserRole::Specialist).len(), items.len());
        assert_eq!(filtered_ids(&items, UserRole::Admin).len(), items.len());
        assert_eq!(filtered_ids(&items, UserRole::Manager), ["liability", "suot", "law"]);
        assert_eq!(filtered_ids(&items, UserRole::Hr), ["training", "docs"]);
        assert_eq!(filtered_ids(&items, UserRole::Employee), ["ppe"]);
    }
}
