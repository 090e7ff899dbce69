// Server related imports
use axum::{
    Extension,
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

// General imports
use chrono::Utc;
use labsafe_agents::documents::document_templates::{document_templates, template};
use labsafe_core::models::document::{DocumentData, DocumentTemplate, FieldValues};
use serde::{Deserialize, Serialize};

// Library imports
use crate::handlers::json_error::{ErrorToResponse, JsonError, json_rejection_response};
use crate::handlers::sign_in::CurrentUser;
use crate::server::server_state::ServerState;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentRequest {
    pub template_id: String,
    #[serde(default)]
    pub fields: FieldValues,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateDocumentResponse {
    pub content: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDocumentRequest {
    pub template_id: String,
    #[serde(default)]
    pub fields: FieldValues,
    #[serde(default)]
    pub document_name: String,
}

/// Resolve the template and check that every required field is filled in
fn checked_template(template_id: &str, fields: &FieldValues) -> Result<DocumentTemplate, Response> {
    let Some(template) = template(template_id) else {
        return Err(JsonError::new(format!("Unknown document template {template_id}"))
            .to_response(StatusCode::NOT_FOUND));
    };
    let missing = template.missing_required(fields);
    if !missing.is_empty() {
        let labels = template
            .fields
            .iter()
            .filter(|field| missing.contains(&field.id))
            .map(|field| field.label.as_str())
            .collect::<Vec<_>>();
        return Err(JsonError::new(format!(
            "Заполните обязательные поля: {}",
            labels.join(", ")
        ))
        .to_response(StatusCode::BAD_REQUEST));
    }
    Ok(template)
}

/// Template together with the display name of its category
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListing {
    #[serde(flatten)]
    pub template: DocumentTemplate,
    pub category_label: String,
}

pub async fn list_templates() -> Json<Vec<TemplateListing>> {
    Json(
        document_templates()
            .into_iter()
            .map(|template| TemplateListing {
                category_label: template.category.label().to_string(),
                template,
            })
            .collect(),
    )
}

/// Fill in a template
pub async fn generate_document(
    Extension(_current_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    payload: Result<Json<GenerateDocumentRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };
    let template = match checked_template(&payload.template_id, &payload.fields) {
        Ok(template) => template,
        Err(response) => return response,
    };

    match state.document_generator.generate_document(
        &template,
        &payload.fields,
        Utc::now().date_naive(),
    ) {
        Ok(content) => Json(GenerateDocumentResponse { content }).into_response(),
        Err(e) => {
            tracing::error!("Failed to generate {}: {e:?}", template.id);
            JsonError::new("Failed to generate the document".to_string())
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Save the entered values of a document
pub async fn save_document(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    payload: Result<Json<SaveDocumentRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };
    let template = match checked_template(&payload.template_id, &payload.fields) {
        Ok(template) => template,
        Err(response) => return response,
    };

    let document_name = match payload.document_name.trim() {
        "" => template.name.as_str(),
        name => name,
    };
    let document = DocumentData::new(
        &template.id,
        payload.fields,
        &current_user.0.id,
        document_name,
    );
    match state.document_store.save_document(&current_user.0.id, document) {
        Ok(document) => (StatusCode::CREATED, Json(document)).into_response(),
        Err(e) => {
            tracing::error!("Failed to save document for {}: {e:?}", current_user.0.id);
            JsonError::new("Failed to save the document".to_string())
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn list_documents(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Json<Vec<DocumentData>> {
    Json(state.document_store.list_documents(&current_user.0.id))
}
