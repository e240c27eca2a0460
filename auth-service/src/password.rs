//! Password hashing with Argon2id.
//!
//! Hashes are salted PHC strings; verification re-derives from the
//! stored salt. The hash is treated as opaque everywhere else.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::rngs::OsRng;

/// Error returned when hashing a password fails.
#[derive(Debug, Clone)]
pub enum PasswordError {
    /// The hasher rejected the input.
    Hash(String),
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(reason) => write!(f, "failed to hash password: {reason}"),
        }
    }
}

impl std::error::Error for PasswordError {}

/// Hash a password with a freshly generated salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verify a password against a stored hash.
///
/// An unparseable hash verifies as false rather than erroring; the
/// caller cannot do anything else with it.
#[must_use]
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("hunter2").expect("hash");
        assert!(verify_password("hunter2", &hash));
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("hunter2").expect("hash");
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("hunter2").expect("hash");
        let second = hash_password("hunter2").expect("hash");
        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_hash_verifies_false() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }
}
