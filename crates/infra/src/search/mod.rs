//! Search mirror abstractions: secondary, eventually-consistent free-text index.

pub mod in_memory;
pub mod query;

use std::sync::Arc;

use thiserror::Error;

use aquareg_core::{Page, PageRequest, Record, RecordId};

pub use in_memory::InMemorySearchIndex;
pub use query::Query;

/// Search-mirror failure.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("search index lock poisoned")]
    LockPoisoned,

    /// Backend-specific failure (index engine down, IO, ...).
    #[error("search backend failure: {0}")]
    Backend(String),
}

/// Secondary index for one record type.
///
/// Kept best-effort consistent with the primary store by the orchestrator;
/// never authoritative.
pub trait SearchMirror<E: Record>: Send + Sync {
    /// Upsert the record's document under its id.
    fn index(&self, record: &E) -> Result<(), SearchError>;

    /// Drop the document for `id`. Absent documents are not an error.
    fn remove(&self, id: RecordId) -> Result<(), SearchError>;

    /// Free-text query (`field:value` tokens, AND/OR/NOT), paged.
    fn search(&self, query: &str, request: &PageRequest) -> Result<Page<E>, SearchError>;
}

impl<E, M> SearchMirror<E> for Arc<M>
where
    E: Record,
    M: SearchMirror<E> + ?Sized,
{
    fn index(&self, record: &E) -> Result<(), SearchError> {
        (**self).index(record)
    }

    fn remove(&self, id: RecordId) -> Result<(), SearchError> {
        (**self).remove(id)
    }

    fn search(&self, query: &str, request: &PageRequest) -> Result<Page<E>, SearchError> {
        (**self).search(query, request)
    }
}
