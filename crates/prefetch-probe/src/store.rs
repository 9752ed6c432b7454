//! Stash — shared keyed counter storage that outlives individual requests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// A stash key, scoped by the resource path that owns it.
///
/// Two fixtures mounted at different paths may reuse the same `id`
/// without seeing each other's counters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StashKey {
    pub scope: String,
    pub id: String,
}

impl StashKey {
    pub fn new(scope: &str, id: &str) -> Self {
        Self {
            scope: scope.to_string(),
            id: id.to_string(),
        }
    }
}

/// Keyed counter storage with retrieve-and-clear semantics.
///
/// Each call is individually synchronized; a `take` followed by a `put`
/// is not atomic as a pair.
pub trait CounterStore: Send + Sync {
    /// Remove and return the value stored under `key`.
    fn take(&self, key: &StashKey) -> Option<u64>;

    /// Store `value` under `key`, replacing any existing value.
    fn put(&self, key: StashKey, value: u64);

    /// Number of keys currently holding a value.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process stash living for the lifetime of the server.
#[derive(Debug, Default)]
pub struct MemoryStash {
    entries: Mutex<HashMap<StashKey, u64>>,
}

impl MemoryStash {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryStash {
    fn take(&self, key: &StashKey) -> Option<u64> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    fn put(&self, key: StashKey, value: u64) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }

    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_entry() {
        let stash = MemoryStash::new();
        let key = StashKey::new("/prefetch", "abc");
        stash.put(key.clone(), 3);

        assert_eq!(stash.take(&key), Some(3));
        assert_eq!(stash.take(&key), None);
        assert!(stash.is_empty());
    }

    #[test]
    fn test_put_overwrites() {
        let stash = MemoryStash::new();
        let key = StashKey::new("/prefetch", "abc");
        stash.put(key.clone(), 1);
        stash.put(key.clone(), 7);

        assert_eq!(stash.len(), 1);
        assert_eq!(stash.take(&key), Some(7));
    }

    #[test]
    fn test_scopes_are_isolated() {
        let stash = MemoryStash::new();
        stash.put(StashKey::new("/a", "same"), 1);
        stash.put(StashKey::new("/b", "same"), 2);

        assert_eq!(stash.take(&StashKey::new("/a", "same")), Some(1));
        assert_eq!(stash.take(&StashKey::new("/b", "same")), Some(2));
    }
}
