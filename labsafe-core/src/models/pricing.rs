use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Plan assumed for users without a subscription
pub const DEFAULT_PLAN_ID: &str = "free";

/// Length of a paid subscription term
pub const SUBSCRIPTION_DAYS: i64 = 30;

/// Usage limits of a plan; `None` stands for unlimited
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub consultations_per_day: Option<u32>,
    pub documents_per_month: Option<u32>,
    pub chat_history_days: Option<u32>,
    pub max_users: Option<u32>,
    pub api_access: bool,
    pub advanced_analytics: bool,
}

impl PlanLimits {
    /// Documents left this month, `None` when unlimited
    pub fn documents_remaining(&self, created: u32) -> Option<u32> {
        self.documents_per_month
            .map(|limit| limit.saturating_sub(created))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub id: String,
    pub name: String,
    /// Monthly price in rubles
    pub price: u32,
    pub description: String,
    pub popular: bool,
    pub features: Vec<String>,
    pub limits: PlanLimits,
}

fn make_plan(
    id: &str,
    name: &str,
    price: u32,
    description: &str,
    popular: bool,
    features: &[&str],
    limits: PlanLimits,
) -> PricingPlan {
    PricingPlan {
        id: id.to_string(),
        name: name.to_string(),
        price,
        description: description.to_string(),
        popular,
        features: features.iter().map(|f| f.to_string()).collect(),
        limits,
    }
}

/// All plans offered on the pricing page
pub fn pricing_plans() -> Vec<PricingPlan> {
    vec![
        make_plan(
            "free",
            "Базовый",
            0,
            "Для ознакомления с возможностями системы",
            false,
            &[
                "Консультации по базовым вопросам охраны труда",
                "Доступ к основным нормативным документам",
                "Базовые шаблоны документов",
                "Один пользователь",
            ],
            PlanLimits {
                consultations_per_day: Some(5),
                documents_per_month: Some(10),
                chat_history_days: Some(7),
                max_users: Some(1),
                api_access: false,
                advanced_analytics: false,
            },
        ),
        make_plan(
            "standard",
            "Стандартный",
            1990,
            "Для малого и среднего бизнеса",
            true,
            &[
                "Неограниченные консультации по охране труда",
                "Полный доступ к базе знаний",
                "Расширенные шаблоны документов",
                "До 5 пользователей",
                "Приоритетная поддержка",
            ],
            PlanLimits {
                consultations_per_day: Some(20),
                documents_per_month: Some(50),
                chat_history_days: Some(30),
                max_users: Some(5),
                api_access: false,
                advanced_analytics: false,
            },
        ),
        make_plan(
            "premium",
            "Премиум",
            4990,
            "Для крупных предприятий",
            false,
            &[
                "Неограниченные консультации по охране труда",
                "Полный доступ к базе знаний",
                "Все шаблоны документов",
                "До 20 пользователей",
                "Приоритетная поддержка 24/7",
                "Расширенная аналитика",
                "API доступ",
            ],
            PlanLimits {
                consultations_per_day: Some(100),
                documents_per_month: Some(200),
                chat_history_days: Some(90),
                max_users: Some(20),
                api_access: true,
                advanced_analytics: true,
            },
        ),
        make_plan(
            "corporate",
            "Корпоративный",
            9990,
            "Индивидуальные решения для крупных организаций",
            false,
            &[
                "Неограниченные консультации по охране труда",
                "Полный доступ к базе знаний",
                "Все шаблоны документов",
                "Неограниченное количество пользователей",
                "Выделенная линия поддержки 24/7",
                "Расширенная аналитика и отчетность",
                "Полный API доступ",
                "Интеграция с корпоративными системами",
            ],
            PlanLimits {
                consultations_per_day: None,
                documents_per_month: None,
                chat_history_days: None,
                max_users: None,
                api_access: true,
                advanced_analytics: true,
            },
        ),
    ]
}

pub fn find_plan(plan_id: &str) -> Option<PricingPlan> {
    pricing_plans().into_iter().find(|plan| plan.id == plan_id)
}

/// Limits of a plan, falling back to the free plan for unknown ids
pub fn plan_limits(plan_id: &str) -> PlanLimits {
    let plans = pricing_plans();
    plans
        .iter()
        .find(|plan| plan.id == plan_id)
        .unwrap_or(&plans[0])
        .limits
        .clone()
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
}

/// Selected plan persisted under `user_plan_<userId>`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub user_id: String,
    pub plan_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
}

impl Subscription {
    pub fn new(user_id: &str, plan_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            plan_id: plan_id.to_string(),
            start_date: now,
            end_date: now + Duration::days(SUBSCRIPTION_DAYS),
            status: SubscriptionStatus::Active,
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && now < self.end_date
    }
}
