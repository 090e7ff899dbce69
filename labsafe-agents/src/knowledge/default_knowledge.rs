//! Bundled labor-safety knowledge base

use labsafe_core::models::user::UserRole;

use super::knowledge_item::{KnowledgeCategory, KnowledgeItem, KnowledgeSection};

const ALL_ROLES: &[UserRole] = &[
    UserRole::Specialist,
    UserRole::Manager,
    UserRole::Hr,
    UserRole::Employee,
    UserRole::Admin,
];

struct ItemSpec<'a> {
    id: &'a str,
    title: &'a str,
    content: &'a str,
    summary: &'a str,
    source: &'a str,
    keywords: &'a [&'a str],
    category: KnowledgeCategory,
    relevant_for: &'a [UserRole],
    sections: &'a [(&'a str, &'a str, &'a str)],
}

impl ItemSpec<'_> {
    fn into_item(self) -> KnowledgeItem {
        KnowledgeItem {
            id: self.id.to_string(),
            title: self.title.to_string(),
            content: self.content.to_string(),
            summary: self.summary.to_string(),
            source: self.source.to_string(),
            keywords: self.keywords.iter().map(|k| k.to_string()).collect(),
            category: self.category,
            relevant_for: self.relevant_for.to_vec(),
            sections: self
                .sections
                .iter()
                .map(|(number, title, content)| KnowledgeSection {
                    number: number.to_string(),
                    title: title.to_string(),
                    content: content.to_string(),
                })
                .collect(),
        }
    }
}

pub fn default_knowledge_items() -> Vec<KnowledgeItem> {
    vec![
        ItemSpec {
            id: "labor_code_section_x",
            title: "Трудовой кодекс РФ, раздел X «Охрана труда»",
            content: "Раздел X Трудового кодекса РФ (статьи 209–231) устанавливает основные требования \
охраны труда. Работодатель обязан обеспечить безопасные условия труда, создать и обеспечить \
функционирование системы управления охраной труда, провести специальную оценку условий труда, \
организовать обучение и инструктажи, обеспечить работников средствами индивидуальной защиты и \
организовать обязательные медицинские осмотры. Работник обязан соблюдать требования охраны труда, \
правильно применять СИЗ, проходить обучение и немедленно сообщать руководителю о любой ситуации, \
угрожающей жизни и здоровью людей.",
            summary: "Основные обязанности работодателя и работника в сфере охраны труда (ст. 209–231 ТК РФ).",
            source: "https://www.consultant.ru/document/cons_doc_LAW_34683/",
            keywords: &["трудовой кодекс", "тк рф", "обязанности работодателя", "обязанности работника", "законодательств"],
            category: KnowledgeCategory::Legislation,
            relevant_for: ALL_ROLES,
            sections: &[
                ("214", "Обязанности работодателя в области охраны труда", "Работодатель обязан обеспечить создание и функционирование системы управления охраной труда, безопасность работников при эксплуатации зданий, оборудования и применении инструментов."),
                ("215", "Обязанности работника в области охраны труда", "Работник обязан соблюдать требования охраны труда, правильно использовать СИЗ, проходить обучение, инструктажи и медицинские осмотры."),
                ("216", "Права работника на труд в условиях, отвечающих требованиям охраны труда", "Работник имеет право на рабочее место, соответствующее требованиям охраны труда, и на отказ от работы при возникновении опасности для жизни и здоровья."),
            ],
        },
        ItemSpec {
            id: "special_assessment_426fz",
            title: "Федеральный закон № 426-ФЗ «О специальной оценке условий труда»",
            content: "Специальная оценка условий труда (СОУТ) — единый комплекс мероприятий по идентификации \
вредных и опасных производственных факторов и оценке уровня их воздействия на работника. СОУТ \
проводится совместно работодателем и аккредитованной организацией не реже одного раза в пять лет, \
а также внепланово: при вводе новых рабочих мест, изменении технологического процесса, после \
несчастного случая на рабочем месте. По результатам устанавливаются классы условий труда (1–4), \
которые определяют гарантии и компенсации работникам и тариф страховых взносов.",
            summary: "Порядок, сроки и последствия проведения специальной оценки условий труда.",
            source: "https://www.consultant.ru/document/cons_doc_LAW_156555/",
            keywords: &["соут", "специальная оценка", "специальной оценки", "условий труда", "426-фз", "класс условий"],
            category: KnowledgeCategory::Legislation,
            relevant_for: &[UserRole::Specialist, UserRole::Manager, UserRole::Hr],
            sections: &[
                ("8", "Обязанности работодателя", "Работодатель организует проведение СОУТ и финансирует её, предоставляет необходимые сведения и знакомит работников с результатами под подпись не позднее чем через 30 календарных дней."),
                ("17", "Внеплановая специальная оценка", "Внеплановая СОУТ проводится при вводе в эксплуатацию новых рабочих мест, изменении технологического процесса, по предписанию инспектора и после несчастного случая."),
            ],
        },
        ItemSpec {
            id: "insurance_125fz",
            title: "Федеральный закон № 125-ФЗ об обязательном социальном страховании от несчастных случаев",
            content: "Закон № 125-ФЗ устанавливает обязательное социальное страхование работников от несчастных \
случаев на производстве и профессиональных заболеваний. Страхователь (работодатель) уплачивает \
страховые взносы в Социальный фонд России, а при наступлении страхового случая работник получает \
пособие по временной нетрудоспособности в размере 100% среднего заработка, единовременные и \
ежемесячные страховые выплаты, оплату медицинской и социальной реабилитации. Часть взносов \
работодатель может направить на финансирование предупредительных мер по сокращению травматизма.",
            summary: "Страхование от несчастных случаев на производстве и профзаболеваний.",
            source: "https://www.consultant.ru/document/cons_doc_LAW_15136/",
            keywords: &["125-фз", "страхован", "профзаболеван", "профессиональное заболевание", "страховые выплаты"],
            category: KnowledgeCategory::Legislation,
            relevant_for: &[UserRole::Specialist, UserRole::Hr],
            sections: &[],
        },
        ItemSpec {
            id: "employer_liability",
            title: "Ответственность за нарушение требований охраны труда",
            content: "За нарушение требований охраны труда предусмотрена административная ответственность по \
статье 5.27.1 КоАП РФ: штраф для юридических лиц до 80 000 рублей за общие нарушения, до 130 000 \
рублей за допуск работника без обучения, инструктажа или медосмотра и до 150 000 рублей за \
необеспечение средствами индивидуальной защиты. Повторное нарушение влечёт штраф до 200 000 рублей \
или приостановление деятельности до 90 суток. При тяжких последствиях наступает уголовная \
ответственность по статье 143 УК РФ. Должностные лица несут дисциплинарную и материальную ответственность.",
            summary: "Административная, уголовная и дисциплинарная ответственность работодателя и должностных лиц.",
            source: "https://www.consultant.ru/document/cons_doc_LAW_34661/",
            keywords: &["ответственност", "штраф", "коап", "5.27.1", "143 ук", "наказани"],
            category: KnowledgeCategory::Responsibility,
            relevant_for: &[UserRole::Specialist, UserRole::Manager],
            sections: &[],
        },
        ItemSpec {
            id: "ohs_management_system",
            title: "Система управления охраной труда (СУОТ)",
            content: "Система управления охраной труда — комплекс взаимосвязанных элементов, устанавливающих \
политику и цели в области охраны труда и процедуры по их достижению. Примерное положение о СУОТ \
утверждено приказом Минтруда России № 776н. Работодатель утверждает положение о СУОТ, распределяет \
обязанности между уровнями управления, планирует мероприятия по охране труда, организует контроль, \
анализирует эффективность системы и обеспечивает её непрерывное совершенствование. При численности \
более 50 работников создаётся служба охраны труда или вводится должность специалиста.",
            summary: "Положение о СУОТ, распределение обязанностей и служба охраны труда (приказ № 776н).",
            source: "https://www.consultant.ru/document/cons_doc_LAW_405192/",
            keywords: &["суот", "система управления", "776н", "служба охраны труда", "положение о системе"],
            category: KnowledgeCategory::Organization,
            relevant_for: &[UserRole::Specialist, UserRole::Manager],
            sections: &[],
        },
        ItemSpec {
            id: "ssbt_standards",
            title: "Система стандартов безопасности труда (ССБТ)",
            content: "Система стандартов безопасности труда — комплекс межгосударственных и национальных \
стандартов группы 12, направленных на обеспечение безопасности труда. ГОСТ 12.0.230-2007 описывает \
общие требования к системам управления охраной труда, ГОСТ 12.0.004-2015 — организацию обучения \
безопасности труда, ГОСТ 12.0.003-2015 — классификацию опасных и вредных производственных \
факторов. Стандарты применяются при разработке локальных нормативных актов, инструкций и при \
оценке профессиональных рисков.",
            summary: "Основные стандарты ССБТ: ГОСТ 12.0.230-2007, 12.0.004-2015, 12.0.003-2015.",
            source: "https://docs.cntd.ru/document/1200058313",
            keywords: &["гост", "ссбт", "стандарт безопасности", "стандарты безопасности"],
            category: KnowledgeCategory::SafetyStandards,
            relevant_for: &[UserRole::Specialist],
            sections: &[
                ("12.0.230-2007", "Системы управления охраной труда. Общие требования", "Устанавливает структуру системы управления: политика, организация, планирование, оценка и действия по улучшению."),
                ("12.0.003-2015", "Опасные и вредные производственные факторы. Классификация", "Классифицирует факторы по природе действия: физические, химические, биологические, психофизиологические."),
            ],
        },
        ItemSpec {
            id: "work_at_height",
            title: "Правила по охране труда при работе на высоте",
            content: "Правила по охране труда при работе на высоте утверждены приказом Минтруда России № 782н. \
Работами на высоте считаются работы, при которых существует риск падения с высоты 1,8 м и более. \
К работам допускаются лица не моложе 18 лет, прошедшие медицинский осмотр, обучение безопасным \
методам и приёмам выполнения работ и имеющие соответствующую группу по безопасности. Работы \
повышенной опасности выполняются по наряду-допуску с применением систем обеспечения безопасности: \
удерживающих, позиционирования, страховочных и эвакуационных.",
            summary: "Допуск к работам на высоте, наряд-допуск и системы безопасности (приказ № 782н).",
            source: "https://www.consultant.ru/document/cons_doc_LAW_372875/",
            keywords: &["на высоте", "высотные работы", "782н", "наряд-допуск", "страховочн"],
            category: KnowledgeCategory::SafetyStandards,
            relevant_for: &[UserRole::Specialist, UserRole::Employee],
            sections: &[],
        },
        ItemSpec {
            id: "ohs_documentation",
            title: "Документация по охране труда",
            content: "Обязательный пакет документов по охране труда включает: положение о системе управления \
охраной труда, приказ о назначении ответственных лиц, инструкции по охране труда для профессий и \
видов работ, программы инструктажей и обучения, журналы регистрации инструктажей, перечень \
профессий для медосмотров, результаты СОУТ и оценки профессиональных рисков, личные карточки учёта \
выдачи СИЗ. Документы можно вести в электронном виде. Инструкции разрабатываются на основе правил \
по охране труда и пересматриваются при изменении условий труда.",
            summary: "Перечень обязательных локальных документов по охране труда.",
            source: "https://www.consultant.ru/document/cons_doc_LAW_416431/",
            keywords: &["документ", "инструкци", "журнал", "приказ о назначении", "локальн"],
            category: KnowledgeCategory::Documents,
            relevant_for: &[UserRole::Specialist, UserRole::Hr],
            sections: &[],
        },
        ItemSpec {
            id: "training_and_briefings",
            title: "Обучение по охране труда и инструктажи",
            content: "Порядок обучения по охране труда и проверки знаний установлен постановлением Правительства \
РФ № 2464. Предусмотрены инструктажи: вводный (до начала работы, проводит специалист по охране \
труда), первичный на рабочем месте (до самостоятельной работы), повторный (не реже одного раза в \
шесть месяцев), внеплановый (при изменении условий труда, после несчастного случая, по требованию \
должностных лиц) и целевой (перед работами по наряду-допуску). Проведение инструктажа \
регистрируется в журнале с подписями инструктирующего и инструктируемого. Кроме инструктажей \
проводятся обучение оказанию первой помощи, применению СИЗ и обучение по программам А, Б и В \
с проверкой знаний.",
            summary: "Виды инструктажей, сроки их проведения и обучение по программам (постановление № 2464).",
            source: "https://www.consultant.ru/document/cons_doc_LAW_405174/",
            keywords: &["инструктаж", "обучение по охране труда", "проверка знаний", "2464", "первой помощи", "стажировк"],
            category: KnowledgeCategory::Training,
            relevant_for: ALL_ROLES,
            sections: &[
                ("Вводный", "Вводный инструктаж", "Проводится со всеми принимаемыми на работу лицами до начала выполнения трудовых функций."),
                ("Первичный", "Первичный инструктаж на рабочем месте", "Проводится до начала самостоятельной работы непосредственным руководителем."),
                ("Повторный", "Повторный инструктаж", "Проводится не реже одного раза в шесть месяцев по программе первичного инструктажа."),
            ],
        },
        ItemSpec {
            id: "occupational_risk_assessment",
            title: "Оценка профессиональных рисков",
            content: "Оценка профессиональных рисков проводится в соответствии с рекомендациями приказа Минтруда \
России № 926 и включает этапы: идентификацию опасностей на рабочих местах, оценку уровня риска \
(по вероятности и тяжести последствий), определение мер управления рисками, документирование \
результатов и пересмотр оценки при изменении условий труда. Меры управления выбираются по \
иерархии: исключение опасности, замена, инженерные меры, административные меры, СИЗ. Результаты \
оформляются картой оценки профессиональных рисков и планом мероприятий по их снижению.",
            summary: "Этапы идентификации опасностей и оценки уровня профессиональных рисков.",
            source: "https://www.consultant.ru/document/cons_doc_LAW_402906/",
            keywords: &["риск", "опасност", "926", "идентификаци"],
            category: KnowledgeCategory::RiskAssessment,
            relevant_for: &[UserRole::Specialist, UserRole::Manager],
            sections: &[
                ("1", "Идентификация опасностей", "Составление перечня опасностей по видам работ, оборудованию и условиям на рабочем месте."),
                ("2", "Оценка уровня риска", "Определение вероятности и тяжести последствий, расчёт уровня риска по матрице."),
                ("3", "Меры управления", "Выбор мер по иерархии управления рисками и назначение ответственных лиц."),
            ],
        },
        ItemSpec {
            id: "accident_investigation",
            title: "Расследование несчастных случаев на производстве",
            content: "Порядок расследования несчастных случаев установлен статьями 227–231 ТК РФ и приказом \
Минтруда России № 223н. Работодатель обязан немедленно организовать первую помощь пострадавшему, \
сохранить обстановку на месте происшествия и в течение суток сообщить о тяжёлом или смертельном \
случае в инспекцию труда, прокуратуру и Социальный фонд. Расследование проводит комиссия не менее \
трёх человек: лёгкий случай — в течение 3 дней, тяжёлый или смертельный — в течение 15 дней. \
Результаты оформляются актом по форме Н-1 в трёх экземплярах, акт хранится 45 лет.",
            summary: "Сроки расследования, состав комиссии и оформление акта по форме Н-1.",
            source: "https://www.consultant.ru/document/cons_doc_LAW_401474/",
            keywords: &["несчастн", "н-1", "расследовани", "травм", "пострадавш"],
            category: KnowledgeCategory::Documents,
            relevant_for: &[UserRole::Specialist, UserRole::Manager, UserRole::Hr],
            sections: &[],
        },
        ItemSpec {
            id: "personal_protective_equipment",
            title: "Средства индивидуальной защиты",
            content: "Работодатель обязан бесплатно обеспечить работников сертифицированными средствами \
индивидуальной защиты (СИЗ) по единым типовым нормам, утверждённым приказом Минтруда России № 767н. \
Выдача СИЗ фиксируется в личной карточке учёта. Работник обязан правильно применять выданные СИЗ, \
следить за их исправностью и сообщать о неисправности руководителю. Работа без положенных СИЗ \
запрещена, и работник вправе отказаться от её выполнения.",
            summary: "Нормы выдачи, учёт и правила применения СИЗ (приказ № 767н).",
            source: "https://www.consultant.ru/document/cons_doc_LAW_428574/",
            keywords: &["сиз", "средства индивидуальной защиты", "спецодежд", "каск", "767н"],
            category: KnowledgeCategory::SafetyRules,
            relevant_for: &[UserRole::Specialist, UserRole::Employee],
            sections: &[],
        },
        ItemSpec {
            id: "medical_examinations",
            title: "Обязательные медицинские осмотры",
            content: "Предварительные (при поступлении на работу) и периодические медицинские осмотры проводятся \
в порядке, установленном приказом Минздрава России № 29н. Работодатель составляет список работников, \
подлежащих осмотрам, направляет их в медицинскую организацию и оплачивает осмотры. Работник не \
допускается к работе без прохождения обязательного медосмотра, а время прохождения осмотра \
оплачивается с сохранением среднего заработка.",
            summary: "Предварительные и периодические медосмотры (приказ № 29н).",
            source: "https://www.consultant.ru/document/cons_doc_LAW_375542/",
            keywords: &["медосмотр", "медицинск", "29н"],
            category: KnowledgeCategory::SafetyRules,
            relevant_for: &[UserRole::Specialist, UserRole::Hr, UserRole::Employee],
            sections: &[],
        },
        ItemSpec {
            id: "general_overview",
            title: "Охрана труда: общие сведения",
            content: "Охрана труда — система сохранения жизни и здоровья работников в процессе трудовой \
деятельности, включающая правовые, социально-экономические, организационно-технические, \
санитарно-гигиенические, лечебно-профилактические, реабилитационные и иные мероприятия. Я могу \
рассказать о требованиях законодательства, специальной оценке условий труда, инструктажах и \
обучении, оценке профессиональных рисков, расследовании несчастных случаев и помочь подготовить \
документы. Уточните, пожалуйста, ваш вопрос.",
            summary: "Что такое охрана труда и с какими вопросами может помочь ассистент.",
            source: "https://www.consultant.ru/document/cons_doc_LAW_34683/",
            keywords: &[],
            category: KnowledgeCategory::General,
            relevant_for: ALL_ROLES,
            sections: &[],
        },
        ItemSpec {
            id: "general_recent_changes",
            title: "Изменения в законодательстве об охране труда",
            content: "С 1 марта 2022 года действует обновлённый раздел X Трудового кодекса РФ: введена обязанность \
оценивать профессиональные риски, расширены права работников на отказ от опасной работы, \
закреплена возможность электронного документооборота и фиксации микроповреждений. С 1 сентября \
2022 года действует новый порядок обучения по охране труда, а с 1 сентября 2023 года — единые \
типовые нормы выдачи СИЗ. Следите за изменениями на официальном портале правовой информации.",
            summary: "Ключевые изменения требований охраны труда последних лет.",
            source: "http://publication.pravo.gov.ru/",
            keywords: &["изменени", "новое в законодательстве", "нововведени"],
            category: KnowledgeCategory::General,
            relevant_for: ALL_ROLES,
            sections: &[],
        },
    ]
    .into_iter()
    .map(ItemSpec::into_item)
    .collect()
}
