//! HTTP surface of the transaction service.
//!
//! Mirrors the account service's verification and ownership pattern.
//! The referenced `account_id` is never cross-checked against the
//! account service; the two services share nothing but the token secret.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use common::auth::authenticate;
use common::{ApiError, OwnedStore, TokenCodec};

use crate::transaction::{Transaction, TransactionError, TransactionType};

/// Shared state for all transaction handlers.
#[derive(Clone)]
pub struct AppState {
    pub transactions: Arc<OwnedStore<Transaction>>,
    pub codec: Arc<TokenCodec>,
}

impl AppState {
    /// Fresh state with an empty transaction store.
    #[must_use]
    pub fn new(codec: TokenCodec) -> Self {
        Self {
            transactions: Arc::new(OwnedStore::new()),
            codec: Arc::new(codec),
        }
    }
}

/// Build the transaction service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/{transaction_id}", get(get_transaction))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: String,
    pub amount: f64,
    /// Client-supplied type string, validated against the allowed set.
    pub transaction_type: String,
    /// Optional; empty when omitted.
    #[serde(default)]
    pub description: String,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "transaction-service" }))
}

/// Record a transaction owned by the token subject.
///
/// Type is validated before amount, matching the original services'
/// check order.
async fn create_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let username = authenticate(&headers, &state.codec)?;

    let transaction_type =
        TransactionType::parse(&request.transaction_type).ok_or(ApiError::InvalidTransactionType)?;
    let transaction = Transaction::new(
        &request.account_id,
        &username,
        request.amount,
        transaction_type,
        request.description,
    )
    .map_err(|e| match e {
        TransactionError::NonPositiveAmount => ApiError::InvalidAmount,
    })?;

    state
        .transactions
        .insert(transaction.transaction_id.clone(), transaction.clone())?;

    tracing::info!(
        username = %username,
        transaction_id = %transaction.transaction_id,
        "recorded transaction"
    );
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// List the transactions owned by the token subject.
async fn list_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let username = authenticate(&headers, &state.codec)?;
    Ok(Json(state.transactions.list_owned_by(&username)?))
}

/// Fetch one transaction by ID. Existence before ownership.
async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Transaction>, ApiError> {
    let username = authenticate(&headers, &state.codec)?;

    let transaction = state
        .transactions
        .get(&transaction_id)?
        .ok_or(ApiError::NotFound("transaction"))?;
    if transaction.username != username {
        return Err(ApiError::Forbidden);
    }

    Ok(Json(transaction))
}
