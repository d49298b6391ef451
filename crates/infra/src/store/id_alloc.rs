//! Identifier allocation, injected into stores for deterministic testing.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use aquareg_core::RecordId;

/// Issues record identifiers on behalf of a primary store.
pub trait IdAllocator: std::fmt::Debug + Send + Sync {
    fn next_id(&self) -> RecordId;
}

/// Production allocator: time-ordered UUIDv7.
#[derive(Debug, Default)]
pub struct UuidAllocator;

impl IdAllocator for UuidAllocator {
    fn next_id(&self) -> RecordId {
        RecordId::new()
    }
}

/// Deterministic allocator for tests: monotonically increasing ids.
#[derive(Debug)]
pub struct SequentialAllocator {
    next: AtomicU64,
}

impl SequentialAllocator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for SequentialAllocator {
    fn next_id(&self) -> RecordId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        RecordId::from_uuid(Uuid::from_u128(u128::from(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_allocator_is_monotonic_and_deterministic() {
        let a = SequentialAllocator::new();
        let first = a.next_id();
        let second = a.next_id();
        assert!(first < second);

        let b = SequentialAllocator::new();
        assert_eq!(b.next_id(), first);
    }

    #[test]
    fn uuid_allocator_issues_unique_ids() {
        let a = UuidAllocator;
        assert_ne!(a.next_id(), a.next_id());
    }
}
