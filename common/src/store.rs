//! In-memory keyed store for owner-tagged records.
//!
//! Each record carries exactly one owning username, established at
//! creation and never reassigned. Access control in the services reduces
//! to `record.owner() == verified_token_subject`.
//!
//! # Thread Safety
//!
//! The map is wrapped in `RwLock` so many requests can read concurrently
//! while inserts take exclusive access. A write either fully succeeds and
//! is visible to subsequent reads, or fails before any mutation.

use std::collections::HashMap;
use std::sync::RwLock;

/// A record tagged with its owning username.
pub trait Owned {
    /// Username of the identity that created the record.
    fn owner(&self) -> &str;
}

/// Error returned when a store operation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A previous panic left the lock poisoned.
    LockPoisoned,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LockPoisoned => write!(f, "store lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Keyed collection of owner-tagged records.
///
/// Records are never mutated or deleted once inserted; the only
/// operations are insert, point lookup, and ownership-filtered listing.
#[derive(Debug)]
pub struct OwnedStore<T> {
    records: RwLock<HashMap<String, T>>,
}

impl<T: Owned + Clone> OwnedStore<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a record under the given generated ID.
    pub fn insert(&self, id: String, record: T) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.insert(id, record);
        Ok(())
    }

    /// Fetch a record by ID, if present.
    pub fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.get(id).cloned())
    }

    /// All records owned by `owner`. Order is not significant.
    pub fn list_owned_by(&self, owner: &str) -> Result<Vec<T>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records
            .values()
            .filter(|record| record.owner() == owner)
            .cloned()
            .collect())
    }

    /// Number of records in the store.
    pub fn len(&self) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.len())
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl<T: Owned + Clone> Default for OwnedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        owner: String,
        body: String,
    }

    impl Owned for Note {
        fn owner(&self) -> &str {
            &self.owner
        }
    }

    fn note(owner: &str, body: &str) -> Note {
        Note {
            owner: owner.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_insert_then_get() {
        let store = OwnedStore::new();
        store
            .insert("id-1".to_string(), note("alice", "hello"))
            .expect("insert");

        let found = store.get("id-1").expect("get");
        assert_eq!(found, Some(note("alice", "hello")));
        assert_eq!(store.get("id-2").expect("get"), None);
    }

    #[test]
    fn test_list_filters_by_owner() {
        let store = OwnedStore::new();
        store
            .insert("a".to_string(), note("alice", "one"))
            .expect("insert");
        store
            .insert("b".to_string(), note("bob", "two"))
            .expect("insert");
        store
            .insert("c".to_string(), note("alice", "three"))
            .expect("insert");

        let alices = store.list_owned_by("alice").expect("list");
        assert_eq!(alices.len(), 2);
        assert!(alices.iter().all(|n| n.owner == "alice"));
    }

    #[test]
    fn test_list_for_unknown_owner_is_empty() {
        let store: OwnedStore<Note> = OwnedStore::new();
        assert!(store.list_owned_by("nobody").expect("list").is_empty());
        assert!(store.is_empty().expect("is_empty"));
    }

    #[test]
    fn test_concurrent_inserts_all_land() {
        let store = Arc::new(OwnedStore::new());
        let mut handles = Vec::new();

        for thread_id in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    store
                        .insert(format!("{thread_id}-{i}"), note("alice", "x"))
                        .expect("insert");
                }
            }));
        }
        for handle in handles {
            handle.join().expect("thread join");
        }

        assert_eq!(store.len().expect("len"), 8 * 50);
    }
}
