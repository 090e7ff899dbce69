use labsafe_core::{common::common_traits::IdentifiableTrait, models::user::UserRole};
use serde::{Deserialize, Serialize};

/// Topic families of the knowledge base
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeCategory {
    Legislation,
    SafetyStandards,
    Documents,
    Training,
    RiskAssessment,
    Responsibility,
    Organization,
    SafetyRules,
    General,
}

impl KnowledgeCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Legislation => "legislation",
            Self::SafetyStandards => "safety_standards",
            Self::Documents => "documents",
            Self::Training => "training",
            Self::RiskAssessment => "risk_assessment",
            Self::Responsibility => "responsibility",
            Self::Organization => "organization",
            Self::SafetyRules => "safety_rules",
            Self::General => "general",
        }
    }

    pub fn all() -> [KnowledgeCategory; 9] {
        [
            Self::Legislation,
            Self::SafetyStandards,
            Self::Documents,
            Self::Training,
            Self::RiskAssessment,
            Self::Responsibility,
            Self::Organization,
            Self::SafetyRules,
            Self::General,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.as_str() == name)
    }
}

/// Numbered article of a law or section of a standard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSection {
    pub number: String,
    pub title: String,
    pub content: String,
}

/// One topic of labor-safety information
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub source: String,
    pub keywords: Vec<String>,
    pub category: KnowledgeCategory,
    pub relevant_for: Vec<UserRole>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<KnowledgeSection>,
}

impl KnowledgeItem {
    /// Whether any keyword or the title occurs in the lower-cased query
    pub fn matches(&self, lower_query: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && lower_query.contains(keyword.as_str()))
            || {
                let title = self.title.trim().to_lowercase();
                !title.is_empty() && lower_query.contains(title.as_str())
            }
    }

    pub fn is_relevant_for(&self, role: UserRole) -> bool {
        self.relevant_for.contains(&role)
    }
}

impl IdentifiableTrait for KnowledgeItem {
    fn get_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item() -> KnowledgeItem {
        KnowledgeItem {
            id: "ppe".to_string(),
            title: "Средства индивидуальной защиты".to_string(),
            content: "".to_string(),
            summary: "".to_string(),
            source: "".to_string(),
            keywords: vec!["сиз".to_string(), "спецодежд".to_string(), "".to_string()],
            category: KnowledgeCategory::SafetyRules,
            relevant_for: vec![UserRole::Employee],
            sections: Vec::new(),
        }
    }

    #[test]
    fn test_matches_keyword_or_title() {
        let item = make_item();
        assert!(item.matches("где получить спецодежду?"));
        assert!(item.matches("нормы выдачи сиз"));
        assert!(item.matches("что такое средства индивидуальной защиты"));
        assert!(!item.matches("медосмотр"));
    }

    #[test]
    fn test_blank_title_matches_nothing() {
        let mut item = make_item();
        item.title = "  ".to_string();
        item.keywords.clear();
        assert!(!item.matches("привет"));
        assert!(!item.matches(""));
    }

    #[test]
    fn test_category_names() {
        for category in KnowledgeCategory::all() {
            assert_eq!(KnowledgeCategory::from_name(category.as_str()), Some(category));
        }
        assert_eq!(
            serde_json::to_value(KnowledgeCategory::RiskAssessment).unwrap(),
            "risk_assessment"
        );
        assert!(KnowledgeCategory::from_name("unknown").is_none());
    }
}
