//! Account record type.
//!
//! # Invariants
//!
//! - `account_type` is one of the two allowed values, enforced by the
//!   type itself.
//! - `account_id` is a freshly generated UUID, globally unique.
//! - The owner is the verified token subject, never a client field.
//! - Balance starts at 0 and is never mutated by this service.

use common::Owned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
}

impl AccountType {
    /// Parse a client-supplied type string.
    ///
    /// Returns `None` for anything but `checking` or `savings`, so the
    /// handler can reject it as a 400 rather than a body-shape error.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            _ => None,
        }
    }
}

/// A bank account owned by one identity.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Generated unique key.
    pub account_id: String,
    /// Owning username, from the verified token subject.
    pub username: String,
    pub account_type: AccountType,
    /// Always 0.0 at creation; nothing in this service moves money.
    pub balance: f64,
}

impl Account {
    /// Create a new account for `username` with a zero balance.
    #[must_use]
    pub fn new(username: &str, account_type: AccountType) -> Self {
        Self {
            account_id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            account_type,
            balance: 0.0,
        }
    }
}

impl Owned for Account {
    fn owner(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_types() {
        assert_eq!(AccountType::parse("checking"), Some(AccountType::Checking));
        assert_eq!(AccountType::parse("savings"), Some(AccountType::Savings));
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        assert_eq!(AccountType::parse("bogus"), None);
        assert_eq!(AccountType::parse(""), None);
        assert_eq!(AccountType::parse("Checking"), None);
    }

    #[test]
    fn test_new_account_starts_at_zero() {
        let account = Account::new("alice", AccountType::Checking);
        assert_eq!(account.username, "alice");
        assert!(account.balance.abs() < f64::EPSILON);
        assert_eq!(account.owner(), "alice");
    }

    #[test]
    fn test_account_ids_are_unique() {
        let first = Account::new("alice", AccountType::Savings);
        let second = Account::new("alice", AccountType::Savings);
        assert_ne!(first.account_id, second.account_id);
    }

    #[test]
    fn test_serializes_type_lowercase() {
        let account = Account::new("alice", AccountType::Savings);
        let value = serde_json::to_value(&account).expect("serialize");
        assert_eq!(value["account_type"], "savings");
        assert_eq!(value["balance"], 0.0);
    }
}
