use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::models::pricing::{DEFAULT_PLAN_ID, Subscription, find_plan};
use crate::storage::{
    key_value::{JsonStoreExt, KeyValueStore},
    storage_keys::user_plan_key,
};

/// Selected pricing plan kept under `user_plan_<userId>`
#[derive(Debug)]
pub struct SubscriptionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SubscriptionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Start a 30 day subscription, replacing the previous one
    pub fn subscribe(&self, user_id: &str, plan_id: &str, now: DateTime<Utc>) -> Result<Subscription> {
        if find_plan(plan_id).is_none() {
            return Err(anyhow!("Unknown pricing plan {plan_id}"));
        }
        let subscription = Subscription::new(user_id, plan_id, now);
        self.store.write_json(&user_plan_key(user_id), &subscription)?;
        tracing::debug!("User {user_id} subscribed to {plan_id}");
        Ok(subscription)
    }

    pub fn current_subscription(&self, user_id: &str) -> Option<Subscription> {
        self.store.read_json(&user_plan_key(user_id))
    }

    /// Plan of the active subscription, or the free plan
    pub fn current_plan_id(&self, user_id: &str, now: DateTime<Utc>) -> String {
        match self.current_subscription(user_id) {
            Some(subscription) if subscription.is_active(now) => subscription.plan_id,
            _ => DEFAULT_PLAN_ID.to_string(),
        }
    }
}
