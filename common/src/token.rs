//! Token issuance and verification.
//!
//! Tokens are JWTs signed with HS256 using a symmetric secret shared by
//! all services. Claims are `{sub: username, exp: unix seconds}`.
//!
//! # Pre-conditions
//! - The secret must be non-empty and identical across all services.
//!
//! # Post-conditions
//! - On success, `verify` returns the username from the 'sub' claim.
//! - A token past its embedded expiry is rejected with `TokenError::Expired`.
//!
//! # Invariants
//! - Verification is stateless and does not modify any external state.
//! - Tokens are never stored server-side; there is no revocation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// How long an issued token stays valid.
pub const TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Claims embedded in every issued token.
///
/// The 'sub' (subject) claim is required and contains the username.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject claim containing the username.
    sub: String,
    /// Absolute expiry as unix seconds.
    exp: u64,
}

/// Error returned when the codec cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCodecError {
    /// The shared secret is empty.
    EmptySecret,
}

impl std::fmt::Display for TokenCodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "shared secret must not be empty"),
        }
    }
}

impl std::error::Error for TokenCodecError {}

/// Error returned when token issuance or verification fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token is malformed, carries a bad signature, or has no usable
    /// 'sub' claim.
    Invalid,
    /// The signature verifies but the embedded expiry has passed.
    Expired,
    /// Signing failed while issuing a token.
    Signing(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid => write!(f, "invalid token"),
            Self::Expired => write!(f, "expired token"),
            Self::Signing(reason) => write!(f, "failed to sign token: {reason}"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Signs and verifies identity assertions with a shared symmetric secret.
///
/// Any service holding the secret can verify a token independently, so
/// verification never requires a call back to the auth service. The trade
/// is operational: every service must be provisioned with the identical
/// secret, and a single token cannot be revoked early.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec from the shared secret.
    ///
    /// # Errors
    /// Returns `TokenCodecError::EmptySecret` if the secret is empty.
    pub fn new(secret: &str) -> Result<Self, TokenCodecError> {
        if secret.is_empty() {
            return Err(TokenCodecError::EmptySecret);
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        })
    }

    /// Issue a signed token for `subject` with the standard 30 minute TTL.
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if signing fails.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, TOKEN_TTL)
    }

    /// Issue a signed token for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if signing fails or the system clock
    /// is before the unix epoch.
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        let claims = Claims {
            sub: subject.to_string(),
            exp: now.saturating_add(ttl).as_secs(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and extract the username from the 'sub' claim.
    ///
    /// # Errors
    /// Returns `TokenError::Expired` if the signature verifies but the
    /// expiry has passed, and `TokenError::Invalid` for every other
    /// failure (bad signature, malformed encoding, empty 'sub' claim).
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(map_decode_error)?;

        let subject = token_data.claims.sub;
        if subject.is_empty() {
            return Err(TokenError::Invalid);
        }

        Ok(subject)
    }
}

/// Maps jsonwebtoken errors to our `TokenError` type.
///
/// Everything except expiry collapses to `Invalid`: callers are not told
/// whether a rejected token was forged or merely malformed.
fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidToken
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => TokenError::Invalid,
        _ => TokenError::Invalid,
    }
}
