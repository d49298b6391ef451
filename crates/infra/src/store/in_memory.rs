//! In-memory primary store for tests/dev.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use aquareg_core::{Page, PageRequest, Record, RecordId, SortCriterion, SortDirection};

use super::id_alloc::{IdAllocator, UuidAllocator};
use super::{RecordStore, StoreError};

/// In-memory keyed store. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryRecordStore<E> {
    inner: RwLock<BTreeMap<RecordId, E>>,
    ids: Arc<dyn IdAllocator>,
}

impl<E: Record> InMemoryRecordStore<E> {
    pub fn new() -> Self {
        Self::with_allocator(Arc::new(UuidAllocator))
    }

    /// Build with an injected allocator (deterministic ids in tests).
    pub fn with_allocator(ids: Arc<dyn IdAllocator>) -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            ids,
        }
    }
}

impl<E: Record> Default for InMemoryRecordStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn field_value<E: Record>(record: &E, field: &str) -> Option<String> {
    if field == "id" {
        return record.id().map(|id| id.to_string());
    }
    record
        .fields()
        .into_iter()
        .find(|(name, _)| *name == field)
        .map(|(_, value)| value)
}

fn compare<E: Record>(a: &E, b: &E, sort: &[SortCriterion]) -> Ordering {
    for criterion in sort {
        let left = field_value(a, &criterion.field);
        let right = field_value(b, &criterion.field);
        // Records missing the sort field collate last, whatever the direction.
        let ordering = match (left, right) {
            (Some(l), Some(r)) => match criterion.direction {
                SortDirection::Asc => l.cmp(&r),
                SortDirection::Desc => r.cmp(&l),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.id().cmp(&b.id())
}

impl<E: Record> RecordStore<E> for InMemoryRecordStore<E> {
    fn get(&self, id: RecordId) -> Result<Option<E>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(&id).cloned())
    }

    fn save(&self, mut record: E) -> Result<E, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let id = match record.id() {
            Some(id) => id,
            None => {
                let id = self.ids.next_id();
                record.assign_id(id);
                id
            }
        };
        map.insert(id, record.clone());
        Ok(record)
    }

    fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.remove(&id).is_some())
    }

    fn find_all(&self, request: &PageRequest) -> Result<Page<E>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut records: Vec<E> = map.values().cloned().collect();
        drop(map);

        if !request.sort.is_empty() {
            records.sort_by(|a, b| compare(a, b, &request.sort));
        }

        let total = records.len() as u64;
        let items: Vec<E> = records
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();

        Ok(Page {
            items,
            page: request.page,
            size: request.size,
            total,
        })
    }

    fn count(&self) -> Result<u64, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.len() as u64)
    }
}
