// Shared building blocks for the SecureBank services.
//
// Trust model: the auth service issues signed tokens, and every other
// service verifies them locally with the same shared secret. Nothing in
// this crate makes a network call - verification is purely cryptographic,
// so the auth service is never a runtime dependency of the others.

pub mod auth;
pub mod config;
pub mod error;
pub mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod token;

pub use error::ApiError;
pub use store::{Owned, OwnedStore, StoreError};
pub use token::{TokenCodec, TokenError};
