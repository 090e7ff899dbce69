// Server related imports
use axum::{
    Extension,
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

// General imports
use labsafe_core::models::{chat_session::ChatSession, message::Message};
use serde::{Deserialize, Serialize};
use serde_json::json;

// Library imports
use crate::handlers::json_error::{ErrorToResponse, JsonError, json_rejection_response};
use crate::handlers::sign_in::CurrentUser;
use crate::server::server_state::ServerState;

/// Reply stored when the assistant fails to answer
pub const ASSISTANT_ERROR_RESPONSE: &str = "Извините, произошла ошибка при обработке вашего запроса. Пожалуйста, попробуйте еще раз.";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub content: String,
    /// Continue this chat instead of starting a new one
    #[serde(default)]
    pub chat_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub chat: ChatSession,
    pub reply: Message,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteChatRequest {
    pub chat_id: String,
}

fn chat_not_found(chat_id: &str) -> Response {
    JsonError::new(format!("Chat {chat_id} not found")).to_response(StatusCode::NOT_FOUND)
}

/// Ask the assistant and record the exchange
pub async fn chat(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };
    let user = current_user.0;
    let content = payload.content.trim();
    if content.is_empty() {
        return JsonError::new("Message content is empty".to_string())
            .to_response(StatusCode::BAD_REQUEST);
    }
    if let Some(chat_id) = payload.chat_id.as_deref() {
        if state.chat_store.get_session(&user.id, chat_id).is_none() {
            return chat_not_found(chat_id);
        }
    }

    let question = Message::new_user(content);
    let reply = match state
        .assistant
        .get_assistant_response(content, user.role)
        .await
    {
        Ok(response) => Message::new_assistant(&response.text, response.references),
        Err(e) => {
            tracing::error!("Assistant failed to answer {content:?}: {e:?}");
            Message::new_assistant(ASSISTANT_ERROR_RESPONSE, Vec::new())
        }
    };

    match state.chat_store.append_messages(
        &user.id,
        payload.chat_id.as_deref(),
        vec![question, reply.clone()],
    ) {
        Ok(chat) => Json(ChatResponse { chat, reply }).into_response(),
        Err(e) => {
            tracing::error!("Failed to save the chat for {}: {e:?}", user.id);
            JsonError::new("Failed to save the chat".to_string())
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// The user's chat history
pub async fn list_chats(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Json<Vec<ChatSession>> {
    Json(state.chat_store.list_sessions(&current_user.0.id))
}

pub async fn delete_chat(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    payload: Result<Json<DeleteChatRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };
    match state
        .chat_store
        .delete_session(&current_user.0.id, &payload.chat_id)
    {
        Ok(true) => Json(json!({"deleted": payload.chat_id})).into_response(),
        Ok(false) => chat_not_found(&payload.chat_id),
        Err(e) => {
            tracing::error!("Failed to delete chat {}: {e:?}", payload.chat_id);
            JsonError::new("Failed to delete the chat".to_string())
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
