use anyhow::Result;
use chrono::{DateTime, NaiveDate};
use labsafe_core::models::document::{DocumentTemplate, FieldValue, FieldValues};
use minijinja::{AutoEscape, Environment, Value, context};
use std::collections::BTreeMap;
use tracing::instrument;

use super::document_layouts::{LAYOUTS, layout_names};

/// Date format used in the generated documents
pub const RU_DATE_FORMAT: &str = "%d.%m.%Y";

/// Render a date as `DD.MM.YYYY`
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. Anything else is returned
/// unchanged and missing values become the empty string.
pub fn ru_date(value: Value) -> String {
    if value.is_undefined() || value.is_none() {
        return String::new();
    }
    let raw = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format(RU_DATE_FORMAT).to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return timestamp.date_naive().format(RU_DATE_FORMAT).to_string();
    }
    raw
}

/// Printed form of a field value; unchecked boxes print nothing
fn printable(value: &FieldValue) -> Value {
    match value {
        FieldValue::Flag(false) => Value::from(""),
        FieldValue::Flag(true) => Value::from(true),
        FieldValue::Text(text) => Value::from(text.as_str()),
    }
}

/// Fills the document layouts with the entered field values
#[derive(Debug)]
pub struct DocumentGenerator {
    env: Environment<'static>,
}

impl DocumentGenerator {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        // plain text output
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("ru_date", ru_date);
        for (name, source) in LAYOUTS.iter().copied() {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Header, body and signature block of the document
    ///
    /// `issued_on` is the date printed next to the signatures.
    #[instrument(level = "debug", skip(self, template, fields), fields(template_id = %template.id))]
    pub fn generate_document(
        &self,
        template: &DocumentTemplate,
        fields: &FieldValues,
        issued_on: NaiveDate,
    ) -> Result<String> {
        let fields = fields
            .iter()
            .map(|(id, value)| (id.as_str(), printable(value)))
            .collect::<BTreeMap<_, _>>();
        let ctx = context! {
            template => template,
            fields => fields,
            issued_on => issued_on.format("%Y-%m-%d").to_string(),
        };
        let mut document = String::new();
        for name in layout_names(template) {
            document.push_str(&self.env.get_template(&name)?.render(&ctx)?);
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::document_templates::{document_templates, template};
    use labsafe_core::models::document::{FieldValue, TemplateCategory};

    fn issued_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn make_fields(values: &[(&str, &str)]) -> FieldValues {
        values
            .iter()
            .map(|(id, value)| (id.to_string(), FieldValue::from(*value)))
            .collect()
    }

    #[test]
    fn test_ru_date() {
        assert_eq!(ru_date(Value::from("2024-03-05")), "05.03.2024");
        assert_eq!(ru_date(Value::from("2024-03-05T23:10:00+03:00")), "05.03.2024");
        assert_eq!(ru_date(Value::from("вчера")), "вчера");
        assert_eq!(ru_date(Value::UNDEFINED), "");
        assert_eq!(ru_date(Value::from(())), "");
    }

    #[test]
    fn test_instruction_document() -> Result<()> {
        let generator = DocumentGenerator::new()?;
        let instruction = template("instruction_general").unwrap();
        let fields = make_fields(&[
            ("company_name", "ООО \"Север\""),
            ("director_position", "Директор"),
            ("director_name", "Петров П.П."),
            ("approval_date", "2025-01-15"),
            ("general_requirements", "Соблюдать правила внутреннего распорядка."),
        ]);
        let document = generator.generate_document(&instruction, &fields, issued_on())?;

        assert!(document.contains("\"УТВЕРЖДАЮ\""));
        assert!(document.contains("Директор ООО \"Север\""));
        assert!(document.contains("\"15.01.2025\""));
        assert!(document.contains(&instruction.name));
        assert!(document.contains("1. ОБЩИЕ ТРЕБОВАНИЯ ОХРАНЫ ТРУДА\n\nСоблюдать правила внутреннего распорядка.\n"));
        assert!(document.contains("Инструкцию разработал"));
        assert!(document.ends_with("Дата: 01.04.2025\n"));
        Ok(())
    }

    #[test]
    fn test_missing_fields_render_empty() -> Result<()> {
        let generator = DocumentGenerator::new()?;
        for template in document_templates() {
            let document = generator.generate_document(&template, &FieldValues::new(), issued_on())?;
            assert!(!document.contains("undefined"), "{}", template.id);
            assert!(!document.contains("none"), "{}", template.id);
            assert!(!document.contains("{{"), "{}", template.id);
        }
        let act = generator.generate_document(
            &template("accident_report").unwrap(),
            &FieldValues::new(),
            issued_on(),
        )?;
        assert!(act.contains("ФИО: \n"));
        assert!(act.contains("1. Дата и время несчастного случая: \n"));
        Ok(())
    }

    #[test]
    fn test_generation_is_pure() -> Result<()> {
        let generator = DocumentGenerator::new()?;
        let card = template("risk_assessment_card").unwrap();
        let fields = make_fields(&[
            ("workplace_name", "Сварщик"),
            ("control_measures", "Вентиляция"),
            ("assessment_date", "не указана"),
        ]);
        let first = generator.generate_document(&card, &fields, issued_on())?;
        let second = DocumentGenerator::new()?.generate_document(&card, &fields, issued_on())?;
        assert_eq!(first, second);
        // measures appear in both sections of the card
        assert_eq!(first.matches("Вентиляция").count(), 2);
        assert!(first.contains("Дата проведения оценки: не указана"));
        Ok(())
    }

    #[test]
    fn test_journal_has_no_signature_and_order_is_empty() -> Result<()> {
        let generator = DocumentGenerator::new()?;
        let journal = generator.generate_document(
            &template("training_journal").unwrap(),
            &make_fields(&[("responsible_person", "Сидоров С.С.")]),
            issued_on(),
        )?;
        assert!(journal.contains("Сидоров С.С."));
        assert!(!journal.contains("Дата: 01.04.2025"));

        let mut order = template("instruction_office").unwrap();
        order.category = TemplateCategory::Order;
        assert_eq!(generator.generate_document(&order, &FieldValues::new(), issued_on())?, "");
        Ok(())
    }

    #[test]
    fn test_checkbox_values_render() -> Result<()> {
        let generator = DocumentGenerator::new()?;
        let mut fields = make_fields(&[("victim_fullname", "Иванов И.И.")]);
        fields.insert("victim_experience".to_string(), FieldValue::from(true));
        let act = generator.generate_document(&template("accident_report").unwrap(), &fields, issued_on())?;
        assert!(act.contains("ФИО: Иванов И.И.\n"));
        assert!(act.contains("Стаж работы: true\n"));

        fields.insert("victim_experience".to_string(), FieldValue::from(false));
        let act = generator.generate_document(&template("accident_report").unwrap(), &fields, issued_on())?;
        assert!(act.contains("Стаж работы: \n"));
        assert!(!act.contains("false"));
        Ok(())
    }
}
