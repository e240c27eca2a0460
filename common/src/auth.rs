//! Bearer-token extraction and the shared verification glue.
//!
//! Every protected handler calls [`authenticate`] before touching any
//! store. A request without a usable `Authorization: Bearer` header is
//! rejected before any business logic runs.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use crate::error::ApiError;
use crate::token::TokenCodec;

/// Extract the bearer token from the `Authorization` header.
///
/// The scheme comparison is case-insensitive per RFC 7235, so
/// `bearer <token>` is accepted alongside `Bearer <token>`.
///
/// # Errors
/// Returns `ApiError::MissingBearer` (surfaced as 403) when the header
/// is absent, not valid ASCII, or not of the form `Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers.get(AUTHORIZATION).ok_or(ApiError::MissingBearer)?;
    let value = value.to_str().map_err(|_| ApiError::MissingBearer)?;
    let (scheme, token) = value.split_once(' ').ok_or(ApiError::MissingBearer)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ApiError::MissingBearer);
    }
    Ok(token)
}

/// Extract and verify the bearer token, returning the token subject.
///
/// # Errors
/// Returns `ApiError::MissingBearer` when no token is presented, and the
/// collapsed token rejection when verification fails.
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> Result<String, ApiError> {
    let token = bearer_token(headers)?;
    codec.verify(token).map_err(ApiError::from)
}
