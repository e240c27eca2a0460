//! End-to-end flows through the auth service handlers.
//!
//! Each test drives the handlers directly with a fresh state, covering
//! the full register -> login -> verify cycle.

#![cfg(test)]

use axum::http::HeaderMap;

use common::auth::authenticate;
use common::{ApiError, TokenCodec, testing};

use crate::handlers::test_helpers::{login_user, register_user, state};
use crate::{CredentialError, CredentialRecord};

#[tokio::test]
async fn test_full_session_lifecycle() {
    let state = state();

    register_user(&state, "alice", "correct horse battery staple").await;
    let token = login_user(&state, "alice", "correct horse battery staple")
        .await
        .expect("login")
        .access_token;

    // The token is self-contained: verification needs only the codec,
    // exactly as the other services perform it.
    let headers = testing::bearer_headers(&token);
    let subject = authenticate(&headers, &state.codec).expect("authenticated");
    assert_eq!(subject, "alice");
}

#[tokio::test]
async fn test_duplicate_registration_leaves_original_intact() {
    let state = state();
    register_user(&state, "alice", "original-password").await;

    let result = state.credentials.register(CredentialRecord {
        username: "alice".to_string(),
        password_hash: "$argon2id$replacement".to_string(),
        email: "attacker@example.com".to_string(),
    });
    assert_eq!(result, Err(CredentialError::Duplicate));

    // The original credentials keep working.
    let token = login_user(&state, "alice", "original-password")
        .await
        .expect("original password still valid")
        .access_token;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_no_header_is_rejected_before_verification() {
    let state = state();
    let result = authenticate(&HeaderMap::new(), &state.codec);
    assert_eq!(result, Err(ApiError::MissingBearer));
}

#[tokio::test]
async fn test_tokens_from_a_different_secret_are_rejected() {
    let state = state();
    register_user(&state, "alice", "pw").await;

    // A token signed with some other secret must not verify, regardless
    // of its claims.
    let foreign = TokenCodec::new("some-other-deployment-secret")
        .expect("codec")
        .issue("alice")
        .expect("issue");
    let headers = testing::bearer_headers(&foreign);
    assert_eq!(
        authenticate(&headers, &state.codec),
        Err(ApiError::InvalidToken)
    );
}
