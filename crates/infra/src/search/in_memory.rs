//! In-memory search index for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use aquareg_core::{Page, PageRequest, Record, RecordId};

use super::query::{Document, Query};
use super::{SearchError, SearchMirror};

/// Document-per-record index over the flat `fields()` view.
///
/// Results are ordered by id for determinism; the mirror does not rank.
#[derive(Debug)]
pub struct InMemorySearchIndex<E> {
    inner: RwLock<HashMap<RecordId, (Document, E)>>,
}

impl<E: Record> InMemorySearchIndex<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    fn document(record: &E, id: RecordId) -> Document {
        let mut doc: Document = record
            .fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        doc.insert("id".to_string(), id.to_string());
        doc
    }
}

impl<E: Record> Default for InMemorySearchIndex<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Record> SearchMirror<E> for InMemorySearchIndex<E> {
    fn index(&self, record: &E) -> Result<(), SearchError> {
        let id = record
            .id()
            .ok_or_else(|| SearchError::Backend("cannot index a record without an id".into()))?;
        let doc = Self::document(record, id);
        let mut map = self.inner.write().map_err(|_| SearchError::LockPoisoned)?;
        map.insert(id, (doc, record.clone()));
        Ok(())
    }

    fn remove(&self, id: RecordId) -> Result<(), SearchError> {
        let mut map = self.inner.write().map_err(|_| SearchError::LockPoisoned)?;
        map.remove(&id);
        Ok(())
    }

    fn search(&self, query: &str, request: &PageRequest) -> Result<Page<E>, SearchError> {
        let query = Query::parse(query)?;

        let map = self.inner.read().map_err(|_| SearchError::LockPoisoned)?;
        let mut hits: Vec<(RecordId, E)> = map
            .iter()
            .filter(|(_, (doc, _))| query.matches(doc))
            .map(|(id, (_, record))| (*id, record.clone()))
            .collect();
        drop(map);

        hits.sort_by_key(|(id, _)| *id);

        let total = hits.len() as u64;
        let items: Vec<E> = hits
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .map(|(_, record)| record)
            .collect();

        Ok(Page {
            items,
            page: request.page,
            size: request.size,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquareg_core::DomainResult;

    #[derive(Debug, Clone, PartialEq)]
    struct Site {
        id: Option<RecordId>,
        name: String,
    }

    impl Record for Site {
        type Patch = ();

        const KIND: &'static str = "site";

        fn id(&self) -> Option<RecordId> {
            self.id
        }

        fn assign_id(&mut self, id: RecordId) {
            self.id = Some(id);
        }

        fn validate(&self) -> DomainResult<()> {
            Ok(())
        }

        fn merge(&mut self, _patch: ()) {}

        fn fields(&self) -> Vec<(&'static str, String)> {
            vec![("name", self.name.clone())]
        }
    }

    fn site(n: u128, name: &str) -> Site {
        Site {
            id: Some(RecordId::from_uuid(uuid::Uuid::from_u128(n))),
            name: name.to_string(),
        }
    }

    #[test]
    fn indexing_is_an_upsert() {
        let index = InMemorySearchIndex::new();
        index.index(&site(1, "pump station")).unwrap();
        index.index(&site(1, "water tower")).unwrap();

        let page = index.search("tower", &PageRequest::default()).unwrap();
        assert_eq!(page.total, 1);
        let page = index.search("pump", &PageRequest::default()).unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn search_by_id_finds_exactly_one_document() {
        let index = InMemorySearchIndex::new();
        index.index(&site(1, "alpha")).unwrap();
        index.index(&site(2, "beta")).unwrap();

        let id = site(2, "beta").id.unwrap();
        let page = index
            .search(&format!("id:{id}"), &PageRequest::default())
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "beta");
    }

    #[test]
    fn remove_is_idempotent() {
        let index = InMemorySearchIndex::new();
        let s = site(1, "alpha");
        index.index(&s).unwrap();

        index.remove(s.id.unwrap()).unwrap();
        index.remove(s.id.unwrap()).unwrap();
        let page = index.search("alpha", &PageRequest::default()).unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn results_are_id_ordered_and_paged() {
        let index = InMemorySearchIndex::new();
        for n in 1..=5 {
            index.index(&site(n, "borehole")).unwrap();
        }

        let page = index.search("borehole", &PageRequest::new(1, 2)).unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(
            page.items.iter().map(|s| s.id.unwrap()).collect::<Vec<_>>(),
            vec![
                RecordId::from_uuid(uuid::Uuid::from_u128(3)),
                RecordId::from_uuid(uuid::Uuid::from_u128(4)),
            ]
        );
    }

    #[test]
    fn indexing_without_an_id_is_a_backend_error() {
        let index = InMemorySearchIndex::new();
        let unsaved = Site {
            id: None,
            name: "alpha".to_string(),
        };
        assert!(matches!(
            index.index(&unsaved),
            Err(SearchError::Backend(_))
        ));
    }
}
