use std::sync::Arc;
use tracing::instrument;

use super::knowledge_base::KnowledgeBase;
use super::knowledge_item::{KnowledgeCategory, KnowledgeItem};

/// Keyword matching of free-text queries against a [`KnowledgeBase`]
pub trait KnowledgeLookupTraitExt {
    /// Items whose keywords or title occur in the query, in source order
    ///
    /// Falls back to the `general` items when nothing matches
    fn find_relevant(&self, query: &str) -> Vec<Arc<KnowledgeItem>>;

    /// Category of the first matching item, or `general`
    fn categorize_question(&self, query: &str) -> KnowledgeCategory;
}

impl KnowledgeLookupTraitExt for KnowledgeBase {
    #[instrument(level = "debug", skip(self))]
    fn find_relevant(&self, query: &str) -> Vec<Arc<KnowledgeItem>> {
        let lower_query = query.to_lowercase();
        let matches = self
            .items()
            .iter()
            .filter(|item| item.matches(&lower_query))
            .cloned()
            .collect::<Vec<_>>();
        tracing::debug!("Found {} matching knowledge items", matches.len());

        if matches.is_empty() {
            return self.by_category(KnowledgeCategory::General);
        }
        matches
    }

    fn categorize_question(&self, query: &str) -> KnowledgeCategory {
        let lower_query = query.to_lowercase();
        self.items()
            .iter()
            .find(|item| item.matches(&lower_query))
            .map(|item| item.category)
            .unwrap_or(KnowledgeCategory::General)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn ids(items: &[Arc<KnowledgeItem>]) -> Vec<String> {
        items.iter().map(|item| item.id.clone()).collect()
    }

    #[test]
    fn test_keyword_queries_include_their_items() -> Result<()> {
        let kb = KnowledgeBase::bundled()?;
        for item in kb.items() {
            for keyword in item.keywords.iter() {
                let query = format!("Подскажите, пожалуйста: {keyword}?");
                let found = ids(&kb.find_relevant(&query));
                assert!(
                    found.contains(&item.id),
                    "query {query:?} did not return {}",
                    item.id
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_unmatched_query_returns_general_items() -> Result<()> {
        let kb = KnowledgeBase::bundled()?;
        let general = ids(&kb.by_category(KnowledgeCategory::General));
        assert!(!general.is_empty());
        assert_eq!(ids(&kb.find_relevant("Привет! Как дела?")), general);
        assert_eq!(ids(&kb.find_relevant("")), general);
        Ok(())
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_matches_titles() -> Result<()> {
        let kb = KnowledgeBase::bundled()?;
        assert!(ids(&kb.find_relevant("ИНСТРУКТАЖ")).contains(&"training_and_briefings".to_string()));
        assert!(
            ids(&kb.find_relevant("Расскажи про оценка профессиональных рисков"))
                .contains(&"occupational_risk_assessment".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_empty_knowledge_base_yields_nothing() {
        let kb = KnowledgeBase::default();
        assert!(kb.find_relevant("инструктаж").is_empty());
    }

    #[test]
    fn test_categorize_question() -> Result<()> {
        let kb = KnowledgeBase::bundled()?;
        assert_eq!(kb.categorize_question("Когда проводить СОУТ?"), KnowledgeCategory::Legislation);
        assert_eq!(kb.categorize_question("Нормы выдачи СИЗ"), KnowledgeCategory::SafetyRules);
        assert_eq!(kb.categorize_question("Добрый день"), KnowledgeCategory::General);
        Ok(())
    }
}
