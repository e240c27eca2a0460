//! Registered identities, keyed by username.
//!
//! # Invariants
//!
//! - Username uniqueness is enforced at registration under the write
//!   lock, so two concurrent registrations of the same name cannot both
//!   succeed.
//! - Records are never mutated or deleted once stored.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

/// A registered identity.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Unique username, immutable once registered.
    pub username: String,
    /// Opaque salted password hash (PHC string).
    pub password_hash: String,
    /// Contact email, stored as given.
    pub email: String,
}

/// Error returned when a credential store operation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The username is already registered.
    Duplicate,
    /// A previous panic left the lock poisoned.
    LockPoisoned,
}

impl std::fmt::Display for CredentialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate => write!(f, "username already registered"),
            Self::LockPoisoned => write!(f, "credential store lock poisoned"),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Thread-safe map of username to credential record.
#[derive(Debug, Default)]
pub struct CredentialStore {
    records: RwLock<HashMap<String, CredentialRecord>>,
}

impl CredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new identity.
    ///
    /// # Errors
    /// Returns `CredentialError::Duplicate` if the username is taken.
    pub fn register(&self, record: CredentialRecord) -> Result<(), CredentialError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| CredentialError::LockPoisoned)?;
        match records.entry(record.username.clone()) {
            Entry::Occupied(_) => Err(CredentialError::Duplicate),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    /// Look up an identity by username.
    pub fn get(&self, username: &str) -> Result<Option<CredentialRecord>, CredentialError> {
        let records = self
            .records
            .read()
            .map_err(|_| CredentialError::LockPoisoned)?;
        Ok(records.get(username).cloned())
    }
}
