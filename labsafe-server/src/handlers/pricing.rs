// Server related imports
use axum::{
    Extension,
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

// General imports
use chrono::{DateTime, Datelike, Utc};
use labsafe_core::models::{
    pricing::{PricingPlan, Subscription, find_plan, plan_limits, pricing_plans},
    user::User,
};
use serde::{Deserialize, Serialize};

// Library imports
use crate::handlers::json_error::{ErrorToResponse, JsonError, json_rejection_response};
use crate::handlers::sign_in::CurrentUser;
use crate::server::server_state::ServerState;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub plan_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub documents_created: u32,
    /// `None` for unlimited plans
    pub documents_limit: Option<u32>,
    pub documents_remaining: Option<u32>,
    pub chat_history_days: Option<u32>,
    pub chats: usize,
    pub api_access: bool,
    pub advanced_analytics: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub user: User,
    pub plan: PricingPlan,
    pub subscription: Option<Subscription>,
    pub usage: UsageStats,
}

/// Midnight UTC on the first day of the month of `now`
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc())
        .unwrap_or(now)
}

pub async fn pricing() -> Json<Vec<PricingPlan>> {
    Json(pricing_plans())
}

pub async fn subscribe(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };
    if find_plan(&payload.plan_id).is_none() {
        return JsonError::new(format!("Unknown pricing plan {}", payload.plan_id))
            .to_response(StatusCode::NOT_FOUND);
    }
    match state
        .subscription_store
        .subscribe(&current_user.0.id, &payload.plan_id, Utc::now())
    {
        Ok(subscription) => Json(subscription).into_response(),
        Err(e) => {
            tracing::error!("Failed to subscribe {}: {e:?}", current_user.0.id);
            JsonError::new("Failed to save the subscription".to_string())
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Current plan and usage of the signed-in user
pub async fn dashboard(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Response {
    let user = current_user.0;
    let now = Utc::now();
    let plan_id = state.subscription_store.current_plan_id(&user.id, now);
    let Some(plan) = find_plan(&plan_id) else {
        return JsonError::new(format!("Unknown pricing plan {plan_id}"))
            .to_response(StatusCode::INTERNAL_SERVER_ERROR);
    };

    let limits = plan_limits(&plan.id);
    let documents_created = state
        .document_store
        .count_documents_since(&user.id, month_start(now));
    let usage = UsageStats {
        documents_created,
        documents_limit: limits.documents_per_month,
        documents_remaining: limits.documents_remaining(documents_created),
        chat_history_days: limits.chat_history_days,
        chats: state.chat_store.list_sessions(&user.id).len(),
        api_access: limits.api_access,
        advanced_analytics: limits.advanced_analytics,
    };

    Json(DashboardResponse {
        subscription: state.subscription_store.current_subscription(&user.id),
        user,
        plan,
        usage,
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_start() {
        let now = Utc.with_ymd_and_hms(2025, 3, 17, 15, 42, 7).unwrap();
        assert_eq!(
            month_start(now),
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
        );
    }
}
