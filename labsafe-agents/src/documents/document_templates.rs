use labsafe_core::models::document::{DocumentTemplate, FieldKind, TemplateCategory, TemplateField};

fn text(id: &str, label: &str, required: bool) -> TemplateField {
    TemplateField::new(id, label, FieldKind::Text, required)
}

fn textarea(id: &str, label: &str, required: bool) -> TemplateField {
    TemplateField::new(id, label, FieldKind::Textarea, required)
}

fn date(id: &str, label: &str, required: bool) -> TemplateField {
    TemplateField::new(id, label, FieldKind::Date, required)
}

fn new_template(
    id: &str,
    name: &str,
    description: &str,
    category: TemplateCategory,
    fields: Vec<TemplateField>,
) -> DocumentTemplate {
    DocumentTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        fields,
    }
}

/// Approval block shared by all instructions
fn instruction_approval_fields() -> Vec<TemplateField> {
    vec![
        text("company_name", "Наименование организации", true)
            .with_placeholder("ООО \"Ромашка\""),
        text("director_position", "Должность руководителя", true)
            .with_default_value("Генеральный директор"),
        text("director_name", "ФИО руководителя", true).with_placeholder("Иванов И.И."),
        date("approval_date", "Дата утверждения", true),
        text("instruction_number", "Номер инструкции", false).with_placeholder("ИОТ-001"),
    ]
}

fn instruction_general() -> DocumentTemplate {
    let mut fields = instruction_approval_fields();
    fields.extend([
        textarea("general_requirements", "Общие требования охраны труда", true),
        textarea("before_work_requirements", "Требования охраны труда перед началом работы", true),
        textarea("during_work_requirements", "Требования охраны труда во время работы", true),
        textarea("emergency_requirements", "Требования охраны труда в аварийных ситуациях", true),
        textarea("after_work_requirements", "Требования охраны труда по окончании работы", true),
    ]);
    new_template(
        "instruction_general",
        "Инструкция по охране труда (общая)",
        "Типовая инструкция по охране труда для работников организации",
        TemplateCategory::Instruction,
        fields,
    )
}

fn instruction_office() -> DocumentTemplate {
    let mut fields = instruction_approval_fields();
    fields.extend([
        textarea("general_requirements", "Общие требования охраны труда", true),
        textarea("before_work_requirements", "Требования охраны труда перед началом работы", true),
        textarea(
            "computer_work_requirements",
            "Требования охраны труда во время работы за компьютером",
            true,
        ),
        textarea("workplace_requirements", "Требования к организации рабочего места", true),
        textarea("emergency_requirements", "Требования охраны труда в аварийных ситуациях", true),
        textarea("after_work_requirements", "Требования охраны труда по окончании работы", true),
    ]);
    new_template(
        "instruction_office",
        "Инструкция по охране труда для офисных работников",
        "Инструкция для работников, использующих персональные компьютеры",
        TemplateCategory::Instruction,
        fields,
    )
}

fn accident_report() -> DocumentTemplate {
    new_template(
        "accident_report",
        "Акт о несчастном случае на производстве (форма Н-1)",
        "Акт расследования несчастного случая на производстве",
        TemplateCategory::Act,
        vec![
            text("company_name", "Наименование организации", true),
            text("company_address", "Адрес организации", true),
            date("accident_date", "Дата несчастного случая", true),
            text("victim_fullname", "ФИО пострадавшего", true),
            TemplateField::new("victim_gender", "Пол пострадавшего", FieldKind::Select, true)
                .with_options(&["Мужской", "Женский"]),
            date("victim_birthdate", "Дата рождения пострадавшего", true),
            text("victim_position", "Профессия (должность) пострадавшего", true),
            text("victim_experience", "Стаж работы", false).with_placeholder("5 лет"),
            text("accident_location", "Место несчастного случая", true),
            textarea("accident_description", "Описание обстоятельств", true),
            text("injury_type", "Характер полученных повреждений", true),
            textarea("accident_cause", "Причины несчастного случая", true),
            textarea(
                "responsible_persons",
                "Лица, допустившие нарушение требований охраны труда",
                false,
            ),
            textarea(
                "prevention_measures",
                "Мероприятия по устранению причин несчастного случая",
                true,
            ),
        ],
    )
}

fn training_journal() -> DocumentTemplate {
    new_template(
        "training_journal",
        "Журнал регистрации инструктажа на рабочем месте",
        "Журнал учета первичного, повторного, внепланового и целевого инструктажей",
        TemplateCategory::Journal,
        vec![
            text("company_name", "Наименование организации", true),
            text("department", "Подразделение", true),
            date("start_date", "Дата начала журнала", true),
            text("responsible_person", "Ответственный за проведение инструктажа", true),
            textarea("journal_entries", "Записи журнала", false)
                .with_placeholder("Дата | ФИО | Профессия | Вид инструктажа | ..."),
        ],
    )
}

fn risk_assessment_card() -> DocumentTemplate {
    new_template(
        "risk_assessment_card",
        "Карта оценки профессиональных рисков",
        "Карта идентификации опасностей и оценки уровня профессиональных рисков",
        TemplateCategory::Report,
        vec![
            text("company_name", "Наименование организации", true),
            text("department", "Подразделение", true),
            date("assessment_date", "Дата проведения оценки", true),
            text("workplace_name", "Наименование рабочего места", true),
            textarea("identified_hazards", "Идентифицированные опасности", true),
            textarea("risk_levels", "Оценка уровня риска", true),
            textarea("control_measures", "Меры управления рисками", true),
            textarea("responsible_persons", "Ответственные лица", false),
            text("implementation_dates", "Сроки выполнения", false),
        ],
    )
}

/// All bundled document templates
pub fn document_templates() -> Vec<DocumentTemplate> {
    vec![
        instruction_general(),
        instruction_office(),
        accident_report(),
        training_journal(),
        risk_assessment_card(),
    ]
}

/// Bundled template by id
pub fn template(id: &str) -> Option<DocumentTemplate> {
    document_templates().into_iter().find(|template| template.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use labsafe_core::common::collections::HashSet;

    #[test]
    fn test_template_ids_are_unique() {
        let templates = document_templates();
        let ids = templates.iter().map(|t| t.id.as_str()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), templates.len());
        for template in templates.iter() {
            let field_ids = template.fields.iter().map(|f| f.id.as_str()).collect::<HashSet<_>>();
            assert_eq!(field_ids.len(), template.fields.len(), "{}", template.id);
        }
    }

    #[test]
    fn test_template_lookup() {
        let act = template("accident_report").unwrap();
        assert_eq!(act.category, TemplateCategory::Act);
        let gender = act.fields.iter().find(|f| f.id == "victim_gender").unwrap();
        assert_eq!(gender.kind, FieldKind::Select);
        assert_eq!(gender.options.as_ref().unwrap().len(), 2);
        assert!(template("unknown").is_none());
    }
}
