//! HTTP surface of the account service.
//!
//! Every protected handler verifies the bearer token first; ownership
//! checks run strictly after existence checks so a nonexistent ID always
//! reports 404 regardless of who asks.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use common::auth::authenticate;
use common::{ApiError, OwnedStore, TokenCodec};

use crate::account::{Account, AccountType};

/// Shared state for all account handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<OwnedStore<Account>>,
    pub codec: Arc<TokenCodec>,
}

impl AppState {
    /// Fresh state with an empty account store.
    #[must_use]
    pub fn new(codec: TokenCodec) -> Self {
        Self {
            accounts: Arc::new(OwnedStore::new()),
            codec: Arc::new(codec),
        }
    }
}

/// Build the account service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{account_id}", get(get_account))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Client-supplied type string, validated against the allowed set.
    pub account_type: String,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "account-service" }))
}

/// Create an account owned by the token subject.
async fn create_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let username = authenticate(&headers, &state.codec)?;

    let account_type =
        AccountType::parse(&request.account_type).ok_or(ApiError::InvalidAccountType)?;
    let account = Account::new(&username, account_type);
    state
        .accounts
        .insert(account.account_id.clone(), account.clone())?;

    tracing::info!(username = %username, account_id = %account.account_id, "created account");
    Ok((StatusCode::CREATED, Json(account)))
}

/// List the accounts owned by the token subject.
///
/// A subject with no accounts gets an empty list, never an error.
async fn list_accounts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Account>>, ApiError> {
    let username = authenticate(&headers, &state.codec)?;
    Ok(Json(state.accounts.list_owned_by(&username)?))
}

/// Fetch one account by ID.
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Account>, ApiError> {
    let username = authenticate(&headers, &state.codec)?;

    // Existence before ownership: a missing ID is 404 for everyone.
    let account = state
        .accounts
        .get(&account_id)?
        .ok_or(ApiError::NotFound("account"))?;
    if account.username != username {
        return Err(ApiError::Forbidden);
    }

    Ok(Json(account))
}
