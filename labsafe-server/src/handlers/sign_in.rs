// Server related imports
use axum::{
    Extension,
    extract::{Json, Request, State, rejection::JsonRejection},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

// Authentication imports
use axum_extra::{
    TypedHeader,
    headers::{
        Authorization,
        authorization::{Basic, Bearer},
    },
    typed_header::TypedHeaderRejection,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};

// General imports
use crate::{
    handlers::json_error::{ErrorToResponse, JsonError, json_rejection_response},
    server::server_state::ServerState,
};
use labsafe_core::models::user::{User, UserRole};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::task::spawn_blocking;

pub const INVALID_CREDENTIALS: &str = "Неверный email или пароль";
pub const EMAIL_TAKEN: &str = "Пользователь с таким email уже существует";
pub const PASSWORD_MISMATCH: &str = "Пароли не совпадают";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub iat: usize,
    pub exp: usize,
}

pub fn encode_jwt(user: &User, secret: &str, token_hours: i64) -> Result<String, StatusCode> {
    let now = Utc::now();
    let expire: chrono::TimeDelta = Duration::hours(token_hours);
    let exp: usize = (now + expire).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;

    let claim = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
        iat,
        exp,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn decode_jwt(jwt: &str, secret: &str) -> Result<TokenData<Claims>, StatusCode> {
    decode(
        jwt,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// The user resolved from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

#[derive(Debug, Serialize, Deserialize)]
pub struct SignInResponse {
    pub jwt: String,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
    pub full_name: String,
    pub role: UserRole,
}

fn token_response(state: &ServerState, user: User, code: StatusCode) -> Response {
    match encode_jwt(&user, &state.jwt_secret, state.token_hours) {
        Ok(jwt) => (code, Json(SignInResponse { jwt, user })).into_response(),
        Err(e_code) => JsonError::new("Failed to generate token".to_string()).to_response(e_code),
    }
}

/// authorization middleware
pub async fn authorize(
    State(state): State<ServerState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Ok(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(JsonError::new("Missing bearer token".to_string())
            .to_response(StatusCode::UNAUTHORIZED));
    };

    // Authentication
    let token_data = match decode_jwt(bearer.token(), &state.jwt_secret) {
        Ok(data) => data,
        Err(e_code) => {
            return Err(JsonError::new("Unable to decode token".to_string()).to_response(e_code));
        }
    };

    // Fetch the user details from the store
    let current_user = match state.auth_store.find_by_id(&token_data.claims.sub) {
        Some(user) => CurrentUser(user),
        None => {
            return Err(JsonError::new("You are not an authorized user".to_string())
                .to_response(StatusCode::UNAUTHORIZED));
        }
    };

    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// sign in endpoint
pub async fn sign_in(
    State(state): State<ServerState>,
    creds: Result<TypedHeader<Authorization<Basic>>, TypedHeaderRejection>,
) -> Response {
    let Ok(TypedHeader(Authorization(creds))) = creds else {
        return JsonError::new(INVALID_CREDENTIALS.to_string())
            .to_response(StatusCode::UNAUTHORIZED);
    };

    // bcrypt verification blocks
    let auth_store = Arc::clone(&state.auth_store);
    let (email, password) = (creds.username().to_string(), creds.password().to_string());
    let login = spawn_blocking(move || auth_store.login(&email, &password)).await;

    match login {
        Ok(Some(user)) => token_response(&state, user, StatusCode::OK),
        Ok(None) => {
            tracing::debug!("Rejected sign in for {}", creds.username());
            JsonError::new(INVALID_CREDENTIALS.to_string()).to_response(StatusCode::UNAUTHORIZED)
        }
        Err(e) => {
            tracing::error!("Sign in task failed: {e:?}");
            JsonError::new("Failed to sign in".to_string())
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// registration endpoint
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };

    let email = payload.email.trim();
    let full_name = payload.full_name.trim();
    if email.is_empty() || full_name.is_empty() || payload.password.is_empty() {
        return JsonError::new("Заполните все обязательные поля".to_string())
            .to_response(StatusCode::BAD_REQUEST);
    }
    if payload
        .confirm_password
        .as_ref()
        .is_some_and(|confirm| *confirm != payload.password)
    {
        return JsonError::new(PASSWORD_MISMATCH.to_string()).to_response(StatusCode::BAD_REQUEST);
    }

    let auth_store = Arc::clone(&state.auth_store);
    let (email, full_name) = (email.to_string(), full_name.to_string());
    let registered = {
        let email = email.clone();
        spawn_blocking(move || {
            auth_store.register(&email, &payload.password, &full_name, payload.role)
        })
        .await
        .map_err(anyhow::Error::from)
        .and_then(|registered| registered)
    };

    match registered {
        Ok(Some(user)) => token_response(&state, user, StatusCode::CREATED),
        Ok(None) => JsonError::new(EMAIL_TAKEN.to_string()).to_response(StatusCode::CONFLICT),
        Err(e) => {
            tracing::error!("Failed to register {email}: {e:?}");
            JsonError::new("Произошла ошибка при регистрации".to_string())
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// sign out endpoint
pub async fn sign_out(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Response {
    match state.auth_store.logout() {
        Ok(()) => {
            tracing::debug!("Signed out {}", current_user.0.email);
            Json(json!({"signedOut": true})).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to clear the session user: {e:?}");
            JsonError::new("Failed to sign out".to_string())
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: User,
    pub role_label: String,
}

/// current user endpoint
pub async fn me(Extension(current_user): Extension<CurrentUser>) -> Json<MeResponse> {
    let role_label = current_user.0.role.label().to_string();
    Json(MeResponse {
        user: current_user.0,
        role_label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user() -> User {
        User {
            id: "user_1".to_string(),
            email: "ivanov@example.ru".to_string(),
            full_name: "Иванов Иван".to_string(),
            role: UserRole::Hr,
        }
    }

    #[test]
    fn test_encode_decode_jwt() -> Result<(), StatusCode> {
        let jwt = encode_jwt(&make_user(), "secret", 24)?;
        assert!(jwt.contains("eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9"));

        let token_data = decode_jwt(&jwt, "secret")?;
        assert_eq!(token_data.claims.sub, "user_1");
        assert_eq!(token_data.claims.email, "ivanov@example.ru");
        assert_eq!(token_data.claims.role, UserRole::Hr);
        assert_eq!(
            token_data.claims.exp - token_data.claims.iat,
            24 * 60 * 60
        );
        Ok(())
    }

    #[test]
    fn test_decode_jwt_rejects_bad_tokens() -> Result<(), StatusCode> {
        let jwt = encode_jwt(&make_user(), "secret", 24)?;
        assert_eq!(
            decode_jwt(&jwt, "other secret").err(),
            Some(StatusCode::UNAUTHORIZED)
        );

        // expired well past the default leeway
        let expired = encode_jwt(&make_user(), "secret", -2)?;
        assert!(decode_jwt(&expired, "secret").is_err());
        Ok(())
    }
}
