//! API error taxonomy shared by all three services.
//!
//! Every error is terminal: it is surfaced directly to the caller as an
//! HTTP status plus a `{"detail": ...}` body and never retried. Token
//! failures are deliberately collapsed so callers cannot distinguish an
//! expired token from a forged one.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::store::StoreError;
use crate::token::TokenError;

/// Caller-visible failure of an API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No `Authorization: Bearer` header on a protected route.
    ///
    /// Rejected with 403, not 401. This mirrors the original services'
    /// observed behavior and is part of the contract.
    MissingBearer,
    /// The presented token is malformed or carries a bad signature.
    InvalidToken,
    /// The presented token is past its expiry.
    ExpiredToken,
    /// Registration attempted with a username that already exists.
    DuplicateIdentity,
    /// Unknown username or wrong password at login.
    InvalidCredentials,
    /// `account_type` is not one of the allowed values.
    InvalidAccountType,
    /// `transaction_type` is not one of the allowed values.
    InvalidTransactionType,
    /// Transaction amount is zero or negative.
    InvalidAmount,
    /// The requested record does not exist. Carries the resource name
    /// for the response body.
    NotFound(&'static str),
    /// The record exists but is owned by a different identity.
    Forbidden,
    /// Unexpected server-side failure (lock poisoning, hashing failure).
    Internal(String),
}

impl ApiError {
    /// HTTP status this error surfaces as.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingBearer | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidToken | Self::ExpiredToken | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::DuplicateIdentity
            | Self::InvalidAccountType
            | Self::InvalidTransactionType
            | Self::InvalidAmount => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBearer => write!(f, "not authenticated"),
            // Identical wording for both token failures: the caller must
            // not be able to tell expired from forged.
            Self::InvalidToken | Self::ExpiredToken => write!(f, "invalid or expired token"),
            Self::DuplicateIdentity => write!(f, "user already exists"),
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::InvalidAccountType => write!(f, "invalid account type"),
            Self::InvalidTransactionType => write!(f, "invalid transaction type"),
            Self::InvalidAmount => write!(f, "amount must be positive"),
            Self::NotFound(resource) => write!(f, "{resource} not found"),
            Self::Forbidden => write!(f, "access denied"),
            Self::Internal(reason) => write!(f, "internal error: {reason}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid => Self::InvalidToken,
            TokenError::Expired => Self::ExpiredToken,
            TokenError::Signing(reason) => Self::Internal(reason),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details stay in the logs, never in the response body.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {self}");
            return (status, Json(json!({ "detail": "internal server error" }))).into_response();
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingBearer.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::ExpiredToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::DuplicateIdentity.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidAccountType.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidTransactionType.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::InvalidAmount.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("account").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Internal("oops".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_token_failures_are_indistinguishable() {
        // Same status and same message for expired vs forged.
        assert_eq!(
            ApiError::InvalidToken.status(),
            ApiError::ExpiredToken.status()
        );
        assert_eq!(
            ApiError::InvalidToken.to_string(),
            ApiError::ExpiredToken.to_string()
        );
    }

    #[test]
    fn test_from_token_error() {
        assert_eq!(ApiError::from(TokenError::Invalid), ApiError::InvalidToken);
        assert_eq!(ApiError::from(TokenError::Expired), ApiError::ExpiredToken);
        assert!(matches!(
            ApiError::from(TokenError::Signing("x".to_string())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_into_response_statuses() {
        let response = ApiError::MissingBearer.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = ApiError::ExpiredToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiError::Internal("lock poisoned".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_names_the_resource() {
        assert_eq!(
            ApiError::NotFound("transaction").to_string(),
            "transaction not found"
        );
    }
}
