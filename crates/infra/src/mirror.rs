//! Dual-write orchestration between a primary store and a search mirror.
//!
//! One generic component serves every record type. The contract, for every
//! mutating operation:
//!
//! ```text
//! caller -> validate -> primary store write -> search mirror write -> caller
//! ```
//!
//! The primary write always precedes the mirror write and is the only one
//! allowed to fail the operation: a failed mirror write leaves the mutation
//! successful and the mirror stale, reported as [`MirrorStatus::Degraded`]
//! and logged. There is no retry and no reconciliation; a stale entry heals
//! on the next successful mutation of the same id.

use std::marker::PhantomData;

use thiserror::Error;

use aquareg_core::{DomainError, Page, PageRequest, Record, RecordId};

use crate::search::{SearchError, SearchMirror};
use crate::store::{AutoCommit, RecordStore, StoreError, TransactionScope};

/// Orchestrator-level error.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Deterministic validation failure; neither store was touched.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation conflicts with existing state (e.g. create with an id);
    /// neither store was touched.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The target id is absent from the primary store.
    #[error("not found")]
    NotFound,

    /// Primary-store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Search failure on the query path (never raised for mirror writes).
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl From<DomainError> for SyncError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => SyncError::Validation(msg),
            DomainError::Conflict(msg) => SyncError::Conflict(msg),
            DomainError::NotFound => SyncError::NotFound,
            DomainError::InvalidId(msg) => SyncError::Validation(msg),
        }
    }
}

/// Whether the mirror reflects the mutation that just committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorStatus {
    Synced,
    /// The primary write committed but the mirror write failed; the mirror
    /// is stale for this id until the next successful mutation.
    Degraded(String),
}

impl MirrorStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, MirrorStatus::Degraded(_))
    }
}

/// Outcome of a successful mutation: the stored record plus mirror state.
#[derive(Debug, Clone)]
pub struct Written<E> {
    pub record: E,
    pub mirror: MirrorStatus,
}

/// Primary store + search mirror, kept in sync for one record type.
#[derive(Debug)]
pub struct MirroredStore<E, P, M, T = AutoCommit> {
    primary: P,
    mirror: M,
    txn: T,
    _record: PhantomData<fn() -> E>,
}

impl<E, P, M> MirroredStore<E, P, M>
where
    E: Record,
    P: RecordStore<E>,
    M: SearchMirror<E>,
{
    pub fn new(primary: P, mirror: M) -> Self {
        Self::with_transaction_scope(primary, mirror, AutoCommit)
    }
}

impl<E, P, M, T> MirroredStore<E, P, M, T>
where
    E: Record,
    P: RecordStore<E>,
    M: SearchMirror<E>,
    T: TransactionScope,
{
    /// Build with an explicit transaction scope for primary-store writes.
    /// Mirror writes run outside the scope by construction.
    pub fn with_transaction_scope(primary: P, mirror: M, txn: T) -> Self {
        Self {
            primary,
            mirror,
            txn,
            _record: PhantomData,
        }
    }

    /// Persist a new record; the primary store assigns the id.
    ///
    /// A pre-populated id is a conflict and touches neither store.
    pub fn create(&self, record: E) -> Result<Written<E>, SyncError> {
        if record.id().is_some() {
            return Err(SyncError::Conflict(format!(
                "a new {} cannot already have an id",
                E::KIND
            )));
        }
        record.validate()?;

        let saved = self.txn.run(|| self.primary.save(record))?;
        let mirror = self.mirror_write(&saved);
        Ok(Written {
            record: saved,
            mirror,
        })
    }

    /// Full replace of an existing record's attributes.
    pub fn update(&self, record: E) -> Result<Written<E>, SyncError> {
        let id = record
            .id()
            .ok_or_else(|| SyncError::Validation("an update requires an id".to_string()))?;
        record.validate()?;
        if self.primary.get(id)?.is_none() {
            return Err(SyncError::NotFound);
        }

        let saved = self.txn.run(|| self.primary.save(record))?;
        let mirror = self.mirror_write(&saved);
        Ok(Written {
            record: saved,
            mirror,
        })
    }

    /// Overlay only the patch's set fields onto the stored record.
    ///
    /// `Ok(None)` signals an absent id; this is not a failure.
    pub fn partial_update(
        &self,
        id: RecordId,
        patch: E::Patch,
    ) -> Result<Option<Written<E>>, SyncError> {
        let Some(mut record) = self.primary.get(id)? else {
            return Ok(None);
        };
        record.merge(patch);
        record.validate()?;

        let saved = self.txn.run(|| self.primary.save(record))?;
        let mirror = self.mirror_write(&saved);
        Ok(Some(Written {
            record: saved,
            mirror,
        }))
    }

    /// Point lookup; primary store only.
    pub fn find_one(&self, id: RecordId) -> Result<Option<E>, SyncError> {
        Ok(self.primary.get(id)?)
    }

    /// Paged scan; primary store only.
    pub fn find_all(&self, request: &PageRequest) -> Result<Page<E>, SyncError> {
        Ok(self.primary.find_all(request)?)
    }

    /// Authoritative record count.
    pub fn count(&self) -> Result<u64, SyncError> {
        Ok(self.primary.count()?)
    }

    /// Remove from the primary store, then from the mirror. Idempotent:
    /// ids absent from either store are not an error.
    pub fn delete(&self, id: RecordId) -> Result<MirrorStatus, SyncError> {
        self.txn.run(|| self.primary.delete(id).map(|_| ()))?;

        match self.mirror.remove(id) {
            Ok(()) => Ok(MirrorStatus::Synced),
            Err(err) => {
                tracing::warn!(
                    kind = E::KIND,
                    id = %id,
                    error = %err,
                    "search mirror delete failed; mirror entry is stale"
                );
                Ok(MirrorStatus::Degraded(err.to_string()))
            }
        }
    }

    /// Free-text query; search mirror only. Results reflect mirror staleness.
    pub fn search(&self, query: &str, request: &PageRequest) -> Result<Page<E>, SyncError> {
        Ok(self.mirror.search(query, request)?)
    }

    fn mirror_write(&self, record: &E) -> MirrorStatus {
        match self.mirror.index(record) {
            Ok(()) => MirrorStatus::Synced,
            Err(err) => {
                let id = record.id().map(|id| id.to_string()).unwrap_or_default();
                tracing::warn!(
                    kind = E::KIND,
                    id = %id,
                    error = %err,
                    "search mirror write failed; mirror is stale"
                );
                MirrorStatus::Degraded(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::search::InMemorySearchIndex;
    use crate::store::{InMemoryRecordStore, SequentialAllocator};
    use aquareg_core::DomainResult;

    #[derive(Debug, Clone, PartialEq)]
    struct Asset {
        id: Option<RecordId>,
        label: String,
        remark: Option<String>,
    }

    impl Asset {
        fn new(label: &str) -> Self {
            Self {
                id: None,
                label: label.to_string(),
                remark: None,
            }
        }
    }

    #[derive(Debug, Clone, Default)]
    struct AssetPatch {
        label: Option<String>,
        remark: Option<String>,
    }

    impl Record for Asset {
        type Patch = AssetPatch;

        const KIND: &'static str = "asset";

        fn id(&self) -> Option<RecordId> {
            self.id
        }

        fn assign_id(&mut self, id: RecordId) {
            self.id = Some(id);
        }

        fn validate(&self) -> DomainResult<()> {
            if self.label.trim().is_empty() {
                return Err(DomainError::validation("label cannot be empty"));
            }
            Ok(())
        }

        fn merge(&mut self, patch: AssetPatch) {
            if let Some(label) = patch.label {
                self.label = label;
            }
            if let Some(remark) = patch.remark {
                self.remark = Some(remark);
            }
        }

        fn fields(&self) -> Vec<(&'static str, String)> {
            let mut fields = vec![("label", self.label.clone())];
            if let Some(remark) = &self.remark {
                fields.push(("remark", remark.clone()));
            }
            fields
        }
    }

    /// Mirror wrapper whose writes can be switched off, counting attempts.
    struct FlakyMirror {
        inner: InMemorySearchIndex<Asset>,
        failing: AtomicBool,
        writes: AtomicUsize,
    }

    impl FlakyMirror {
        fn new() -> Self {
            Self {
                inner: InMemorySearchIndex::new(),
                failing: AtomicBool::new(false),
                writes: AtomicUsize::new(0),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl SearchMirror<Asset> for FlakyMirror {
        fn index(&self, record: &Asset) -> Result<(), SearchError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(SearchError::Backend("index unavailable".to_string()));
            }
            self.inner.index(record)
        }

        fn remove(&self, id: RecordId) -> Result<(), SearchError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(SearchError::Backend("index unavailable".to_string()));
            }
            self.inner.remove(id)
        }

        fn search(&self, query: &str, request: &PageRequest) -> Result<Page<Asset>, SearchError> {
            self.inner.search(query, request)
        }
    }

    type TestStore = MirroredStore<Asset, InMemoryRecordStore<Asset>, Arc<FlakyMirror>>;

    fn service() -> (TestStore, Arc<FlakyMirror>) {
        let mirror = Arc::new(FlakyMirror::new());
        let primary =
            InMemoryRecordStore::with_allocator(Arc::new(SequentialAllocator::new()));
        (MirroredStore::new(primary, mirror.clone()), mirror)
    }

    #[test]
    fn create_assigns_id_and_mirrors_the_record() {
        let (svc, _) = service();

        let written = svc.create(Asset::new("standpipe")).unwrap();
        assert_eq!(written.mirror, MirrorStatus::Synced);
        let id = written.record.id.expect("id assigned");

        // The mirror holds exactly one matching document.
        let hits = svc
            .search(&format!("id:{id}"), &PageRequest::default())
            .unwrap();
        assert_eq!(hits.total, 1);
        assert_eq!(hits.items[0].label, "standpipe");
    }

    #[test]
    fn create_rejects_a_prepopulated_id_touching_neither_store() {
        let (svc, mirror) = service();

        let mut asset = Asset::new("standpipe");
        asset.id = Some(RecordId::new());

        let err = svc.create(asset).unwrap_err();
        assert!(matches!(err, SyncError::Conflict(_)));
        assert_eq!(svc.count().unwrap(), 0);
        assert_eq!(mirror.writes(), 0);
    }

    #[test]
    fn create_rejects_invalid_records_before_any_write() {
        let (svc, mirror) = service();

        let err = svc.create(Asset::new("  ")).unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
        assert_eq!(svc.count().unwrap(), 0);
        assert_eq!(mirror.writes(), 0);
    }

    #[test]
    fn update_replaces_every_field_and_rewrites_the_mirror_once() {
        let (svc, mirror) = service();

        let mut created = svc.create(Asset::new("standpipe")).unwrap().record;
        created.remark = Some("east district".to_string());
        svc.update(created.clone()).unwrap();

        let writes_before = mirror.writes();
        created.label = "borehole".to_string();
        created.remark = None; // full replace drops the remark
        let written = svc.update(created.clone()).unwrap();

        assert_eq!(mirror.writes(), writes_before + 1);
        assert_eq!(written.record.label, "borehole");

        let stored = svc.find_one(created.id.unwrap()).unwrap().unwrap();
        assert_eq!(stored.label, "borehole");
        assert_eq!(stored.remark, None);
    }

    #[test]
    fn update_of_a_missing_id_is_not_found() {
        let (svc, _) = service();

        let mut asset = Asset::new("standpipe");
        asset.id = Some(RecordId::new());
        assert!(matches!(svc.update(asset).unwrap_err(), SyncError::NotFound));

        let no_id = Asset::new("standpipe");
        assert!(matches!(
            svc.update(no_id).unwrap_err(),
            SyncError::Validation(_)
        ));
    }

    #[test]
    fn partial_update_touches_only_patched_fields() {
        let (svc, _) = service();

        let mut created = svc.create(Asset::new("standpipe")).unwrap().record;
        created.remark = Some("east district".to_string());
        let created = svc.update(created).unwrap().record;
        let id = created.id.unwrap();

        let written = svc
            .partial_update(
                id,
                AssetPatch {
                    remark: Some("west district".to_string()),
                    ..AssetPatch::default()
                },
            )
            .unwrap()
            .expect("record exists");

        assert_eq!(written.record.label, "standpipe");
        assert_eq!(written.record.remark.as_deref(), Some("west district"));

        // An empty patch leaves the stored record untouched.
        let before = svc.find_one(id).unwrap().unwrap();
        svc.partial_update(id, AssetPatch::default()).unwrap();
        assert_eq!(svc.find_one(id).unwrap().unwrap(), before);
    }

    #[test]
    fn partial_update_of_a_missing_id_returns_none() {
        let (svc, mirror) = service();
        let outcome = svc
            .partial_update(RecordId::new(), AssetPatch::default())
            .unwrap();
        assert!(outcome.is_none());
        assert_eq!(mirror.writes(), 0);
    }

    #[test]
    fn find_all_totals_track_net_creates_minus_deletes() {
        let (svc, mirror) = service();

        // Mirror is down the whole time; the primary stays authoritative.
        mirror.set_failing(true);

        let mut ids = Vec::new();
        for n in 0..4 {
            let written = svc.create(Asset::new(&format!("asset-{n}"))).unwrap();
            assert!(written.mirror.is_degraded());
            ids.push(written.record.id.unwrap());
        }
        svc.delete(ids[0]).unwrap();

        let page = svc.find_all(&PageRequest::default()).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(svc.count().unwrap(), 3);
    }

    #[test]
    fn delete_clears_both_stores_and_is_idempotent() {
        let (svc, _) = service();

        let id = svc.create(Asset::new("standpipe")).unwrap().record.id.unwrap();

        assert_eq!(svc.delete(id).unwrap(), MirrorStatus::Synced);
        assert!(svc.find_one(id).unwrap().is_none());
        let hits = svc
            .search(&format!("id:{id}"), &PageRequest::default())
            .unwrap();
        assert_eq!(hits.total, 0);

        // Deleting again is still a success.
        assert_eq!(svc.delete(id).unwrap(), MirrorStatus::Synced);
    }

    #[test]
    fn mirror_failure_degrades_the_outcome_without_failing_the_mutation() {
        let (svc, mirror) = service();

        mirror.set_failing(true);
        let written = svc.create(Asset::new("standpipe")).unwrap();
        let id = written.record.id.unwrap();
        assert!(written.mirror.is_degraded());

        // Primary holds the record; the mirror missed it.
        assert!(svc.find_one(id).unwrap().is_some());
        assert_eq!(
            svc.search(&format!("id:{id}"), &PageRequest::default())
                .unwrap()
                .total,
            0
        );

        // The stale entry heals on the next successful mutation of that id.
        mirror.set_failing(false);
        let healed = svc
            .partial_update(
                id,
                AssetPatch {
                    remark: Some("revisit".to_string()),
                    ..AssetPatch::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(healed.mirror, MirrorStatus::Synced);
        assert_eq!(
            svc.search(&format!("id:{id}"), &PageRequest::default())
                .unwrap()
                .total,
            1
        );
    }

    #[test]
    fn degraded_mirror_delete_still_removes_the_primary_row() {
        let (svc, mirror) = service();

        let id = svc.create(Asset::new("standpipe")).unwrap().record.id.unwrap();
        mirror.set_failing(true);

        let status = svc.delete(id).unwrap();
        assert!(status.is_degraded());
        assert!(svc.find_one(id).unwrap().is_none());

        // The mirror still holds the stale document until it recovers.
        assert_eq!(
            svc.search(&format!("id:{id}"), &PageRequest::default())
                .unwrap()
                .total,
            1
        );
    }

    #[test]
    fn search_propagates_invalid_queries() {
        let (svc, _) = service();
        let err = svc.search("label: AND", &PageRequest::default()).unwrap_err();
        assert!(matches!(err, SyncError::Search(SearchError::InvalidQuery(_))));
    }
}
