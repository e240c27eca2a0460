//! Helpers shared by the service crates' tests.
//!
//! Provides a codec over a fixed test secret plus token constructors,
//! including an already-expired token for exercising the expiry path.

#![allow(clippy::expect_used)]

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;

use crate::token::TokenCodec;

/// Secret used by every test codec.
pub const TEST_SECRET: &str = "test-shared-secret";

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: u64,
}

/// A codec over the fixed test secret.
#[must_use]
pub fn codec() -> TokenCodec {
    TokenCodec::new(TEST_SECRET).expect("test secret is non-empty")
}

/// A valid token for `subject`, signed with the test secret.
#[must_use]
pub fn token_for(subject: &str) -> String {
    codec().issue(subject).expect("test token issuance")
}

/// A token for `subject` whose expiry is well in the past.
///
/// The expiry is far enough back that the verifier's default leeway
/// cannot mask it.
#[must_use]
pub fn expired_token_for(subject: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs();
    let claims = TestClaims {
        sub: subject.to_string(),
        exp: now - 600,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("test token encoding")
}

/// Headers carrying `Authorization: Bearer <token>`.
#[must_use]
pub fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        format!("Bearer {token}").parse().expect("header value"),
    );
    headers
}
