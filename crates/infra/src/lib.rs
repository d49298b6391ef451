//! Infrastructure layer: stores, search index, and the sync orchestrator.

pub mod mirror;
pub mod search;
pub mod store;

pub use mirror::{MirrorStatus, MirroredStore, SyncError, Written};
pub use search::{InMemorySearchIndex, SearchError, SearchMirror};
pub use store::{
    AutoCommit, IdAllocator, InMemoryRecordStore, RecordStore, SequentialAllocator, StoreError,
    TransactionScope, UuidAllocator,
};
