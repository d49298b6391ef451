//! Primary (authoritative) record storage abstractions.

pub mod id_alloc;
pub mod in_memory;
pub mod txn;

use std::sync::Arc;

use thiserror::Error;

use aquareg_core::{Page, PageRequest, Record, RecordId};

pub use id_alloc::{IdAllocator, SequentialAllocator, UuidAllocator};
pub use in_memory::InMemoryRecordStore;
pub use txn::{AutoCommit, TransactionScope};

/// Primary-store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Backend-specific failure (connection loss, IO, ...).
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Authoritative keyed storage for one record type.
///
/// Synchronous by design: every operation runs to completion on the calling
/// thread. Concurrency control beyond the store's own locking is the
/// backend's concern, not the caller's.
pub trait RecordStore<E: Record>: Send + Sync {
    /// Point lookup by id.
    fn get(&self, id: RecordId) -> Result<Option<E>, StoreError>;

    /// Upsert by id. Assigns a fresh id when the record carries none and
    /// returns the stored form.
    fn save(&self, record: E) -> Result<E, StoreError>;

    /// Remove by id; `false` when nothing was stored under it.
    fn delete(&self, id: RecordId) -> Result<bool, StoreError>;

    /// Paged scan ordered by the request's sort criteria (id as tiebreak).
    fn find_all(&self, request: &PageRequest) -> Result<Page<E>, StoreError>;

    /// Number of stored records.
    fn count(&self) -> Result<u64, StoreError>;
}

impl<E, S> RecordStore<E> for Arc<S>
where
    E: Record,
    S: RecordStore<E> + ?Sized,
{
    fn get(&self, id: RecordId) -> Result<Option<E>, StoreError> {
        (**self).get(id)
    }

    fn save(&self, record: E) -> Result<E, StoreError> {
        (**self).save(record)
    }

    fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        (**self).delete(id)
    }

    fn find_all(&self, request: &PageRequest) -> Result<Page<E>, StoreError> {
        (**self).find_all(request)
    }

    fn count(&self) -> Result<u64, StoreError> {
        (**self).count()
    }
}
