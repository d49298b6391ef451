//! Infrastructure wiring: one mirrored store per record type.

use std::sync::Arc;

use aquareg_core::Record;
use aquareg_infra::{
    IdAllocator, InMemoryRecordStore, InMemorySearchIndex, MirroredStore, UuidAllocator,
};
use aquareg_records::{Beneficiary, Commune, Locality, Parcel, TrackingSheet};

/// Mirrored store over the in-memory tier (dev/test wiring).
pub type Service<E> = MirroredStore<E, InMemoryRecordStore<E>, InMemorySearchIndex<E>>;

pub struct AppServices {
    pub communes: Service<Commune>,
    pub localities: Service<Locality>,
    pub parcels: Service<Parcel>,
    pub beneficiaries: Service<Beneficiary>,
    pub tracking_sheets: Service<TrackingSheet>,
}

pub fn build_services() -> AppServices {
    // One allocator shared across record types; ids are globally unique.
    let ids: Arc<dyn IdAllocator> = Arc::new(UuidAllocator);

    AppServices {
        communes: service(ids.clone()),
        localities: service(ids.clone()),
        parcels: service(ids.clone()),
        beneficiaries: service(ids.clone()),
        tracking_sheets: service(ids),
    }
}

fn service<E: Record>(ids: Arc<dyn IdAllocator>) -> Service<E> {
    MirroredStore::new(
        InMemoryRecordStore::with_allocator(ids),
        InMemorySearchIndex::new(),
    )
}
