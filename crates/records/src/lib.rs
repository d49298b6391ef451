//! `aquareg-records` — the record types managed by the registry.
//!
//! Each record type is a plain data holder implementing [`aquareg_core::Record`]:
//! optional identity, required-field validation, a sparse patch type with
//! field-level merge semantics, and a flat field view for indexing/sorting.

pub mod beneficiary;
pub mod commune;
pub mod locality;
pub mod parcel;
pub mod tracking_sheet;

pub use beneficiary::{Beneficiary, BeneficiaryPatch};
pub use commune::{Commune, CommunePatch};
pub use locality::{Locality, LocalityPatch};
pub use parcel::{Parcel, ParcelPatch};
pub use tracking_sheet::{SheetStatus, TrackingSheet, TrackingSheetPatch};
