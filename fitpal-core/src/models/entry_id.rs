//! Session-unique entry identifiers.
//!
//! Ids come from a process-wide monotonic counter, so two entries created in
//! the same instant still get distinct ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a logged meal or workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Allocate the next identifier.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_increasing() {
        let a = EntryId::next();
        let b = EntryId::next();
        assert!(b > a);
    }

    #[test]
    fn test_rapid_allocation_has_no_collisions() {
        let ids: HashSet<EntryId> = (0..10_000).map(|_| EntryId::next()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_display() {
        let id = EntryId(42);
        assert_eq!(id.to_string(), "#42");
    }
}
