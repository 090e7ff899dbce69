use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Document families; each one has its own header, body and signature layout
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Instruction,
    Act,
    Journal,
    Report,
    Order,
}

impl TemplateCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Instruction => "instruction",
            Self::Act => "act",
            Self::Journal => "journal",
            Self::Report => "report",
            Self::Order => "order",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Instruction => "Инструкция",
            Self::Act => "Акт",
            Self::Journal => "Журнал",
            Self::Report => "Отчет",
            Self::Order => "Приказ",
        }
    }
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Date,
    Select,
    Checkbox,
}

/// Fill-in field of a template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl TemplateField {
    pub fn new(id: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            required,
            placeholder: None,
            options: None,
            default_value: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|o| o.to_string()).collect());
        self
    }

    pub fn with_default_value(mut self, default_value: &str) -> Self {
        self.default_value = Some(default_value.to_string());
        self
    }
}

/// Field value entered by the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    /// Blank text and unchecked boxes count as not provided
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Flag(flag) => !flag,
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

pub type FieldValues = BTreeMap<String, FieldValue>;

/// Fixed document layout with named fill-in fields
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub fields: Vec<TemplateField>,
}

impl DocumentTemplate {
    /// Ids of required fields that are missing or blank
    pub fn missing_required(&self, values: &FieldValues) -> Vec<String> {
        self.fields
            .iter()
            .filter(|field| field.required)
            .filter(|field| values.get(&field.id).is_none_or(|value| value.is_blank()))
            .map(|field| field.id.clone())
            .collect()
    }
}

/// A saved, generated document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    pub id: String,
    pub template_id: String,
    pub fields: FieldValues,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub document_name: String,
}

impl DocumentData {
    pub fn new(template_id: &str, fields: FieldValues, created_by: &str, document_name: &str) -> Self {
        Self {
            id: format!("doc_{}", uuid::Uuid::new_v4().simple()),
            template_id: template_id.to_string(),
            fields,
            created_at: Utc::now(),
            created_by: created_by.to_string(),
            document_name: document_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn make_template() -> DocumentTemplate {
        DocumentTemplate {
            id: "training_journal".to_string(),
            name: "Журнал инструктажа".to_string(),
            description: "".to_string(),
            category: TemplateCategory::Journal,
            fields: vec![
                TemplateField::new("company_name", "Организация", FieldKind::Text, true),
                TemplateField::new("department", "Подразделение", FieldKind::Text, false),
                TemplateField::new("confirmed", "Проверено", FieldKind::Checkbox, true),
            ],
        }
    }

    #[test]
    fn test_missing_required_fields() {
        let template = make_template();
        let mut values = FieldValues::new();
        assert_eq!(template.missing_required(&values), ["company_name", "confirmed"]);

        values.insert("company_name".to_string(), "   ".into());
        values.insert("confirmed".to_string(), false.into());
        assert_eq!(template.missing_required(&values), ["company_name", "confirmed"]);

        values.insert("company_name".to_string(), "ООО \"Ромашка\"".into());
        values.insert("confirmed".to_string(), true.into());
        assert!(template.missing_required(&values).is_empty());
    }

    #[test]
    fn test_field_values_are_untagged() -> Result<()> {
        let values: FieldValues =
            serde_json::from_str(r#"{"company_name": "ООО Ромашка", "confirmed": true}"#)?;
        assert_eq!(values["company_name"], FieldValue::Text("ООО Ромашка".to_string()));
        assert_eq!(values["confirmed"], FieldValue::Flag(true));
        Ok(())
    }
}
