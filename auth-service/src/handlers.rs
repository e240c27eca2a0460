//! HTTP surface of the auth service.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use common::auth::authenticate;
use common::{ApiError, TokenCodec};

use crate::credentials::{CredentialError, CredentialRecord, CredentialStore};
use crate::password;

/// Shared state for all auth handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registered identities.
    pub credentials: Arc<CredentialStore>,
    /// Codec over the shared secret; issues and verifies tokens.
    pub codec: Arc<TokenCodec>,
}

impl AppState {
    /// Fresh state with an empty credential store.
    #[must_use]
    pub fn new(codec: TokenCodec) -> Self {
        Self {
            credentials: Arc::new(CredentialStore::new()),
            codec: Arc::new(codec),
        }
    }
}

/// Build the auth service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify", get(verify))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub username: String,
    pub valid: bool,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "auth-service" }))
}

/// Register a new identity.
///
/// Hashes the password before taking the store lock; the insert itself
/// is atomic, so a duplicate username can never clobber an existing
/// record.
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let password_hash =
        password::hash_password(&request.password).map_err(|e| ApiError::Internal(e.to_string()))?;

    let record = CredentialRecord {
        username: request.username.clone(),
        password_hash,
        email: request.email,
    };
    state.credentials.register(record).map_err(|e| match e {
        CredentialError::Duplicate => ApiError::DuplicateIdentity,
        CredentialError::LockPoisoned => ApiError::Internal(e.to_string()),
    })?;

    tracing::info!(username = %request.username, "registered new identity");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "user created successfully".to_string(),
        }),
    ))
}

/// Authenticate credentials and issue a 30 minute bearer token.
///
/// Unknown username and wrong password produce the same error, so the
/// response does not reveal which identities exist.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let record = state
        .credentials
        .get(&request.username)
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify_password(&request.password, &record.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = state.codec.issue(&request.username)?;
    tracing::debug!(username = %request.username, "issued token");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Verify the presented token and echo its subject.
async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, ApiError> {
    let username = authenticate(&headers, &state.codec)?;
    Ok(Json(VerifyResponse {
        username,
        valid: true,
    }))
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use common::testing;

    use super::*;

    pub fn state() -> AppState {
        AppState::new(testing::codec())
    }

    pub async fn register_user(state: &AppState, username: &str, password: &str) {
        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: format!("{username}@example.com"),
        };
        let _ = register(State(state.clone()), Json(request))
            .await
            .expect("registration succeeds");
    }

    pub async fn login_user(state: &AppState, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        login(State(state.clone()), Json(request))
            .await
            .map(|Json(response)| response)
    }
}

#[cfg(test)]
mod tests {
    use common::testing;

    use super::test_helpers::{login_user, register_user, state};
    use super::*;

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let state = state();
        register_user(&state, "alice", "hunter2").await;

        let request = RegisterRequest {
            username: "alice".to_string(),
            password: "other-password".to_string(),
            email: "alice2@example.com".to_string(),
        };
        let result = register(State(state.clone()), Json(request)).await;
        assert!(matches!(result, Err(ApiError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let state = state();
        register_user(&state, "alice", "hunter2").await;

        let response = login_user(&state, "alice", "hunter2")
            .await
            .expect("login succeeds");
        assert_eq!(response.token_type, "bearer");

        let subject = state
            .codec
            .verify(&response.access_token)
            .expect("token verifies");
        assert_eq!(subject, "alice");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = state();
        register_user(&state, "alice", "hunter2").await;

        let result = login_user(&state, "alice", "wrong").await;
        assert!(matches!(result, Err(ApiError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_username() {
        let state = state();
        let result = login_user(&state, "nobody", "hunter2").await;
        assert!(matches!(result, Err(ApiError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_round_trip() {
        let state = state();
        register_user(&state, "alice", "hunter2").await;
        let token = login_user(&state, "alice", "hunter2")
            .await
            .expect("login")
            .access_token;

        let headers = testing::bearer_headers(&token);
        let Json(response) = verify(State(state.clone()), headers)
            .await
            .expect("verify succeeds");
        assert_eq!(response.username, "alice");
        assert!(response.valid);
    }

    #[tokio::test]
    async fn test_verify_without_token() {
        let state = state();
        let result = verify(State(state.clone()), HeaderMap::new()).await;
        assert!(matches!(result, Err(ApiError::MissingBearer)));
    }

    #[tokio::test]
    async fn test_verify_expired_token() {
        let state = state();
        let headers = testing::bearer_headers(&testing::expired_token_for("alice"));
        let result = verify(State(state.clone()), headers).await;
        assert!(matches!(result, Err(ApiError::ExpiredToken)));
    }
}
