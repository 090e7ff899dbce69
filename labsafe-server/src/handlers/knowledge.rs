// Server related imports
use axum::{
    extract::{Json, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

// General imports
use labsafe_agents::knowledge::{
    knowledge_item::{KnowledgeCategory, KnowledgeItem},
    knowledge_lookup::KnowledgeLookupTraitExt,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// Library imports
use crate::handlers::json_error::{ErrorToResponse, JsonError, json_rejection_response};
use crate::server::server_state::ServerState;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeSearchRequest {
    pub query: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeSearchResponse {
    pub category: KnowledgeCategory,
    pub items: Vec<KnowledgeItem>,
}

fn to_owned_items(items: &[Arc<KnowledgeItem>]) -> Vec<KnowledgeItem> {
    items.iter().map(|item| item.as_ref().clone()).collect()
}

/// Keyword lookup over the knowledge base
pub async fn knowledge_search(
    State(state): State<ServerState>,
    payload: Result<Json<KnowledgeSearchRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => {
            let knowledge_base = state.assistant.knowledge_base();
            let items = knowledge_base.find_relevant(&payload.query);
            tracing::debug!("Knowledge search {:?} found {} items", payload.query, items.len());
            Json(KnowledgeSearchResponse {
                category: knowledge_base.categorize_question(&payload.query),
                items: to_owned_items(&items),
            })
            .into_response()
        }
        Err(rejection) => json_rejection_response(rejection),
    }
}

/// All items of one category
pub async fn knowledge_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> Response {
    match KnowledgeCategory::from_name(&category) {
        Some(category) => Json(to_owned_items(
            &state.assistant.knowledge_base().by_category(category),
        ))
        .into_response(),
        None => JsonError::new(format!("Unknown knowledge category {category}"))
            .to_response(StatusCode::NOT_FOUND),
    }
}
