use anyhow::{Result, anyhow};
use labsafe_core::common::{
    collections::HashMap,
    common_traits::{BuildableTrait, BuilderTrait, IdentifiableTrait},
};
use std::path::Path;
use std::sync::Arc;

use super::default_knowledge::default_knowledge_items;
use super::knowledge_item::{KnowledgeCategory, KnowledgeItem};

/// Static, read-only collection of knowledge items in source order
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    items: Vec<Arc<KnowledgeItem>>,
    index: HashMap<String, Arc<KnowledgeItem>>,
}

impl KnowledgeBase {
    /// The bundled labor-safety knowledge base
    pub fn bundled() -> Result<Self> {
        KnowledgeBaseBuilder::new()
            .with_items(default_knowledge_items())
            .build()
    }

    /// Load the items from a JSON array on disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let items: Vec<KnowledgeItem> = serde_json::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!(
            "Loaded {} knowledge items from {}",
            items.len(),
            path.as_ref().display()
        );
        KnowledgeBaseBuilder::new().with_items(items).build()
    }

    pub fn items(&self) -> &[Arc<KnowledgeItem>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<KnowledgeItem>> {
        self.index.get(id)
    }

    /// All items of one category in source order
    pub fn by_category(&self, category: KnowledgeCategory) -> Vec<Arc<KnowledgeItem>> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect()
    }
}

impl BuildableTrait for KnowledgeBase {
    type T = KnowledgeBaseBuilder;
    fn get_builder() -> Self::T
    where
        Self: Sized,
    {
        Self::T::default()
    }
}

#[derive(Default)]
pub struct KnowledgeBaseBuilder {
    items: Vec<KnowledgeItem>,
}

impl KnowledgeBaseBuilder {
    pub fn with_item(mut self, item: KnowledgeItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: Vec<KnowledgeItem>) -> Self {
        self.items.extend(items);
        self
    }
}

impl BuilderTrait for KnowledgeBaseBuilder {
    type T = KnowledgeBase;

    fn new() -> Self {
        Self::default()
    }

    fn build(self) -> Result<Self::T> {
        let mut items = Vec::with_capacity(self.items.len());
        let mut index = HashMap::<String, Arc<KnowledgeItem>>::new();
        for mut item in self.items.into_iter() {
            if item.title.trim().is_empty() {
                return Err(anyhow!("Knowledge item {} has no title", item.id));
            }
            // matching is done against the lower-cased query
            item.keywords = item
                .keywords
                .iter()
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect();
            let id = item.get_id().to_string();
            if item.to_map(&mut index).is_some() {
                return Err(anyhow!("Duplicate knowledge item id {id}"));
            }
            items.push(Arc::clone(&index[&id]));
        }
        Ok(KnowledgeBase { items, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labsafe_core::models::user::UserRole;
    use std::io::Write;

    fn make_item(id: &str, keywords: &[&str], category: KnowledgeCategory) -> KnowledgeItem {
        KnowledgeItem {
            id: id.to_string(),
            title: id.to_string(),
            content: format!("{id} content"),
            summary: format!("{id} summary"),
            source: "https://example.ru".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            category,
            relevant_for: vec![UserRole::Specialist],
            sections: Vec::new(),
        }
    }

    #[test]
    fn test_builder_normalizes_keywords() -> Result<()> {
        let kb = KnowledgeBase::get_builder()
            .with_item(make_item("a", &[" СОУТ ", "", "Оценка"], KnowledgeCategory::Legislation))
            .build()?;
        assert_eq!(kb.get("a").unwrap().keywords, ["соут", "оценка"]);
        Ok(())
    }

    #[test]
    fn test_builder_rejects_duplicate_ids() {
        let result = KnowledgeBaseBuilder::new()
            .with_item(make_item("a", &[], KnowledgeCategory::General))
            .with_item(make_item("a", &[], KnowledgeCategory::General))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_blank_titles() {
        let mut untitled = make_item("untitled", &["пожар"], KnowledgeCategory::SafetyRules);
        untitled.title = " ".to_string();
        let result = KnowledgeBaseBuilder::new()
            .with_item(untitled)
            .with_item(make_item("general", &[], KnowledgeCategory::General))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_by_category_keeps_source_order() -> Result<()> {
        let kb = KnowledgeBaseBuilder::new()
            .with_items(vec![
                make_item("law_1", &[], KnowledgeCategory::Legislation),
                make_item("general_1", &[], KnowledgeCategory::General),
                make_item("law_2", &[], KnowledgeCategory::Legislation),
            ])
            .build()?;
        let ids = kb
            .by_category(KnowledgeCategory::Legislation)
            .iter()
            .map(|item| item.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["law_1", "law_2"]);
        assert_eq!(kb.len(), 3);
        Ok(())
    }

    #[test]
    fn test_bundled_knowledge_base_builds() -> Result<()> {
        let kb = KnowledgeBase::bundled()?;
        assert!(!kb.is_empty());
        assert!(!kb.by_category(KnowledgeCategory::General).is_empty());
        for item in kb.items() {
            assert!(!item.relevant_for.is_empty(), "{} has no audience", item.id);
            assert!(!item.summary.is_empty(), "{} has no summary", item.id);
        }
        Ok(())
    }

    #[test]
    fn test_from_json_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        let items = vec![make_item("custom", &["Пожарная"], KnowledgeCategory::SafetyRules)];
        write!(file, "{}", serde_json::to_string(&items)?)?;
        let kb = KnowledgeBase::from_json_file(file.path())?;
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.get("custom").unwrap().keywords, ["пожарная"]);
        Ok(())
    }
}
