//! Text layouts of the generated documents
//!
//! Every layout is a minijinja template rendered with `template` (the
//! document template), `fields` (the entered values) and `issued_on`.
//! Unknown fields render as the empty string.

use labsafe_core::models::document::{DocumentTemplate, TemplateCategory};

pub const INSTRUCTION_HEADER: &str = r#"
                                                                "УТВЕРЖДАЮ"
                                                    {{ fields.director_position }} {{ fields.company_name }}
                                                    _____________ {{ fields.director_name }}
                                                    "{{ fields.approval_date | ru_date }}"


                                    ИНСТРУКЦИЯ ПО ОХРАНЕ ТРУДА
                                    {{ template.name }}
                                    {{ fields.instruction_number }}

"#;

pub const ACT_HEADER: &str = r#"
                                    ФОРМА Н-1
                        АКТ О НЕСЧАСТНОМ СЛУЧАЕ НА ПРОИЗВОДСТВЕ

    1. Дата и время несчастного случая: {{ fields.accident_date | ru_date }}
    2. Организация: {{ fields.company_name }}
    3. Адрес организации: {{ fields.company_address }}

"#;

pub const JOURNAL_HEADER: &str = r#"
                                    ЖУРНАЛ
                        РЕГИСТРАЦИИ ИНСТРУКТАЖА НА РАБОЧЕМ МЕСТЕ

    Организация: {{ fields.company_name }}
    Подразделение: {{ fields.department }}
    Начат: {{ fields.start_date | ru_date }}

"#;

pub const REPORT_HEADER: &str = r#"
                                    КАРТА
                        ОЦЕНКИ ПРОФЕССИОНАЛЬНЫХ РИСКОВ

    Организация: {{ fields.company_name }}
    Подразделение: {{ fields.department }}
    Дата проведения оценки: {{ fields.assessment_date | ru_date }}

"#;

pub const INSTRUCTION_GENERAL_BODY: &str = r#"
1. ОБЩИЕ ТРЕБОВАНИЯ ОХРАНЫ ТРУДА

{{ fields.general_requirements }}

2. ТРЕБОВАНИЯ ОХРАНЫ ТРУДА ПЕРЕД НАЧАЛОМ РАБОТЫ

{{ fields.before_work_requirements }}

3. ТРЕБОВАНИЯ ОХРАНЫ ТРУДА ВО ВРЕМЯ РАБОТЫ

{{ fields.during_work_requirements }}

4. ТРЕБОВАНИЯ ОХРАНЫ ТРУДА В АВАРИЙНЫХ СИТУАЦИЯХ

{{ fields.emergency_requirements }}

5. ТРЕБОВАНИЯ ОХРАНЫ ТРУДА ПО ОКОНЧАНИИ РАБОТЫ

{{ fields.after_work_requirements }}
"#;

pub const INSTRUCTION_OFFICE_BODY: &str = r#"
1. ОБЩИЕ ТРЕБОВАНИЯ ОХРАНЫ ТРУДА

{{ fields.general_requirements }}

2. ТРЕБОВАНИЯ ОХРАНЫ ТРУДА ПЕРЕД НАЧАЛОМ РАБОТЫ

{{ fields.before_work_requirements }}

3. ТРЕБОВАНИЯ ОХРАНЫ ТРУДА ВО ВРЕМЯ РАБОТЫ ЗА КОМПЬЮТЕРОМ

{{ fields.computer_work_requirements }}

4. ТРЕБОВАНИЯ К ОРГАНИЗАЦИИ РАБОЧЕГО МЕСТА

{{ fields.workplace_requirements }}

5. ТРЕБОВАНИЯ ОХРАНЫ ТРУДА В АВАРИЙНЫХ СИТУАЦИЯХ

{{ fields.emergency_requirements }}

6. ТРЕБОВАНИЯ ОХРАНЫ ТРУДА ПО ОКОНЧАНИИ РАБОТЫ

{{ fields.after_work_requirements }}
"#;

pub const ACCIDENT_REPORT_BODY: &str = r#"
СВЕДЕНИЯ О ПОСТРАДАВШЕМ:

ФИО: {{ fields.victim_fullname }}
Пол: {{ fields.victim_gender }}
Дата рождения: {{ fields.victim_birthdate | ru_date }}
Профессия (должность): {{ fields.victim_position }}
Стаж работы: {{ fields.victim_experience }}

ОБСТОЯТЕЛЬСТВА НЕСЧАСТНОГО СЛУЧАЯ:

Место несчастного случая: {{ fields.accident_location }}
Описание обстоятельств: {{ fields.accident_description }}
Характер полученных повреждений: {{ fields.injury_type }}

ПРИЧИНЫ НЕСЧАСТНОГО СЛУЧАЯ:

{{ fields.accident_cause }}

ЛИЦА, ДОПУСТИВШИЕ НАРУШЕНИЕ ТРЕБОВАНИЙ ОХРАНЫ ТРУДА:

{{ fields.responsible_persons }}

МЕРОПРИЯТИЯ ПО УСТРАНЕНИЮ ПРИЧИН НЕСЧАСТНОГО СЛУЧАЯ:

{{ fields.prevention_measures }}
"#;

pub const TRAINING_JOURNAL_BODY: &str = r#"
ОТВЕТСТВЕННОЕ ЛИЦО ЗА ПРОВЕДЕНИЕ ИНСТРУКТАЖА:

{{ fields.responsible_person }}

ЗАПИСИ ЖУРНАЛА:

Дата | ФИО инструктируемого | Профессия | Вид инструктажа | Причина проведения | ФИО инструктирующего | Подпись инструктирующего | Подпись инструктируемого
-----|----------------------|-----------|----------------|-------------------|---------------------|--------------------------|----------------------
{{ fields.journal_entries }}
"#;

pub const RISK_ASSESSMENT_CARD_BODY: &str = r#"
ОБЩИЕ СВЕДЕНИЯ О РАБОЧЕМ МЕСТЕ:

Наименование рабочего места: {{ fields.workplace_name }}

ИДЕНТИФИКАЦИЯ ОПАСНОСТЕЙ:

{{ fields.identified_hazards }}

ОЦЕНКА УРОВНЯ РИСКА:

{{ fields.risk_levels }}

МЕРЫ УПРАВЛЕНИЯ РИСКАМИ:

{{ fields.control_measures }}

ПЛАН МЕРОПРИЯТИЙ ПО СНИЖЕНИЮ УРОВНЯ РИСКОВ:

Мероприятия: {{ fields.control_measures }}
Ответственные лица: {{ fields.responsible_persons }}
Сроки выполнения: {{ fields.implementation_dates }}
"#;

pub const INSTRUCTION_SIGNATURE: &str = r#"

Инструкцию разработал: _________________ / _________________ /
                          (подпись)             (ФИО)

С инструкцией ознакомлен: _________________ / _________________ /
                              (подпись)             (ФИО)

Дата: {{ issued_on | ru_date }}
"#;

pub const ACT_SIGNATURE: &str = r#"

Председатель комиссии: _________________ / _________________ /
                          (подпись)             (ФИО)

Члены комиссии:       _________________ / _________________ /
                          (подпись)             (ФИО)
                      _________________ / _________________ /
                          (подпись)             (ФИО)

Дата: {{ issued_on | ru_date }}
"#;

pub const REPORT_SIGNATURE: &str = r#"

Оценку провел:        _________________ / _________________ /
                          (подпись)             (ФИО)

Утвердил:             _________________ / _________________ /
                          (подпись)             (ФИО)

Дата: {{ issued_on | ru_date }}
"#;

/// Every layout, keyed by the name it is registered under
pub const LAYOUTS: &[(&str, &str)] = &[
    ("header/instruction", INSTRUCTION_HEADER),
    ("header/act", ACT_HEADER),
    ("header/journal", JOURNAL_HEADER),
    ("header/report", REPORT_HEADER),
    ("body/instruction_general", INSTRUCTION_GENERAL_BODY),
    ("body/instruction_office", INSTRUCTION_OFFICE_BODY),
    ("body/accident_report", ACCIDENT_REPORT_BODY),
    ("body/training_journal", TRAINING_JOURNAL_BODY),
    ("body/risk_assessment_card", RISK_ASSESSMENT_CARD_BODY),
    ("signature/instruction", INSTRUCTION_SIGNATURE),
    ("signature/act", ACT_SIGNATURE),
    ("signature/report", REPORT_SIGNATURE),
];

fn registered(name: String) -> Option<String> {
    LAYOUTS
        .iter()
        .any(|(layout, _)| *layout == name)
        .then_some(name)
}

/// Names of the header, body and signature layouts used for a template, in order
///
/// Parts without a layout (journal signatures, the `order` category,
/// templates with no body) are left out.
pub fn layout_names(template: &DocumentTemplate) -> Vec<String> {
    let category = template.category;
    let body = match category {
        TemplateCategory::Order => None,
        _ => registered(format!("body/{}", template.id)),
    };
    [
        registered(format!("header/{}", category.as_str())),
        body,
        registered(format!("signature/{}", category.as_str())),
    ]
    .into_iter()
    .flatten()
    .collect()
}
