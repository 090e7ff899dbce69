use anyhow::Result;
use labsafe_core::models::user::UserRole;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use super::response_generator::{AssistantResponse, generate_response};
use crate::knowledge::{knowledge_base::KnowledgeBase, knowledge_lookup::KnowledgeLookupTraitExt};

/// Simulated "thinking" time before the reply is returned
pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(1000);

/// Answers chat questions from the knowledge base
#[derive(Debug, Clone)]
pub struct ChatAssistant {
    knowledge_base: Arc<KnowledgeBase>,
    delay: Duration,
}

impl ChatAssistant {
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self {
            knowledge_base,
            delay: DEFAULT_RESPONSE_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge_base
    }

    /// Lookup, then role-aware generation, then the artificial delay
    #[instrument(level = "debug", skip(self))]
    pub async fn get_assistant_response(
        &self,
        query: &str,
        role: UserRole,
    ) -> Result<AssistantResponse> {
        let matches = self.knowledge_base.find_relevant(query);
        let response = generate_response(&matches, role);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(response)
    }
}
