// Auth service: registers identities, authenticates credentials, and
// issues the bearer tokens every other service verifies locally.

mod credentials;
mod e2e_tests;
mod handlers;
mod password;

pub use credentials::{CredentialError, CredentialRecord, CredentialStore};
pub use handlers::{AppState, router};
