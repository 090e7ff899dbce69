// General imports
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

// From crates
use labsafe_agents::{
    assistant::chat_assistant::ChatAssistant, documents::document_generator::DocumentGenerator,
    knowledge::knowledge_base::KnowledgeBase,
};
use labsafe_core::{
    storage::{file_store::FileStore, key_value::KeyValueStore},
    stores::{
        auth_store::AuthStore, chat_store::ChatStore, document_store::DocumentStore,
        subscription_store::SubscriptionStore,
    },
};

use super::server_config::ServerConfig;

#[derive(Clone)]
pub struct ServerState {
    /// Key-value items shared by all stores
    pub store: Arc<dyn KeyValueStore>,
    pub auth_store: Arc<AuthStore>,
    pub chat_store: Arc<ChatStore>,
    pub document_store: Arc<DocumentStore>,
    pub subscription_store: Arc<SubscriptionStore>,
    pub assistant: Arc<ChatAssistant>,
    pub document_generator: Arc<DocumentGenerator>,
    /// Secret used to sign and verify the JWTs
    pub jwt_secret: Arc<String>,
    pub token_hours: i64,
}

impl ServerState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        knowledge_base: Arc<KnowledgeBase>,
        jwt_secret: &str,
    ) -> Result<Self> {
        Ok(Self {
            auth_store: Arc::new(AuthStore::new(Arc::clone(&store))),
            chat_store: Arc::new(ChatStore::new(Arc::clone(&store))),
            document_store: Arc::new(DocumentStore::new(Arc::clone(&store))),
            subscription_store: Arc::new(SubscriptionStore::new(Arc::clone(&store))),
            assistant: Arc::new(ChatAssistant::new(knowledge_base)),
            document_generator: Arc::new(DocumentGenerator::new()?),
            jwt_secret: Arc::new(jwt_secret.to_string()),
            token_hours: 24,
            store,
        })
    }

    /// Build the state described by the command line
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.data_dir)?);
        let knowledge_base = match config.knowledge_base.as_ref() {
            Some(path) => KnowledgeBase::from_json_file(path)?,
            None => KnowledgeBase::bundled()?,
        };
        tracing::debug!(
            "Serving {} knowledge items from data dir {}",
            knowledge_base.len(),
            config.data_dir
        );
        Ok(Self::new(store, Arc::new(knowledge_base), &config.jwt_secret)?
            .with_response_delay(Duration::from_millis(config.response_delay_ms))
            .with_token_hours(config.token_hours))
    }

    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        let assistant = ChatAssistant::clone(&self.assistant).with_delay(delay);
        self.assistant = Arc::new(assistant);
        self
    }

    pub fn with_token_hours(mut self, token_hours: i64) -> Self {
        self.token_hours = token_hours;
        self
    }

    /// Override the bcrypt cost of new password hashes
    pub fn with_hash_cost(mut self, hash_cost: u32) -> Self {
        self.auth_store =
            Arc::new(AuthStore::new(Arc::clone(&self.store)).with_hash_cost(hash_cost));
        self
    }
}
