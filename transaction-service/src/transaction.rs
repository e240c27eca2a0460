//! Transaction record type.
//!
//! # Invariants
//!
//! - `amount` is strictly positive, enforced by the constructor before
//!   any record exists.
//! - `transaction_type` is one of the three allowed values.
//! - `account_id` is a free-form reference; it is deliberately never
//!   validated against the account service.
//! - The owner is the verified token subject.

use chrono::Utc;
use common::Owned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TransactionType {
    /// Parse a client-supplied type string.
    ///
    /// Returns `None` for anything outside the allowed set.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "deposit" => Some(Self::Deposit),
            "withdrawal" => Some(Self::Withdrawal),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

/// Error returned when a transaction cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// The amount is zero or negative.
    NonPositiveAmount,
}

impl std::fmt::Display for TransactionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "amount must be strictly positive"),
        }
    }
}

impl std::error::Error for TransactionError {}

/// A recorded money movement owned by one identity.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    /// Generated unique key.
    pub transaction_id: String,
    /// Referenced account. Free-form; not checked for existence or
    /// ownership.
    pub account_id: String,
    /// Owning username, from the verified token subject.
    pub username: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    /// Optional free text, empty when omitted.
    pub description: String,
    /// RFC 3339 UTC timestamp of creation.
    pub created_at: String,
}

impl Transaction {
    /// Create a new transaction record.
    ///
    /// # Errors
    /// Returns `TransactionError::NonPositiveAmount` if `amount` is zero
    /// or negative.
    pub fn new(
        account_id: &str,
        username: &str,
        amount: f64,
        transaction_type: TransactionType,
        description: String,
    ) -> Result<Self, TransactionError> {
        if amount <= 0.0 {
            return Err(TransactionError::NonPositiveAmount);
        }

        Ok(Self {
            transaction_id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            username: username.to_string(),
            amount,
            transaction_type,
            description,
            created_at: Utc::now().to_rfc3339(),
        })
    }
}

impl Owned for Transaction {
    fn owner(&self) -> &str {
        &self.username
    }
}
