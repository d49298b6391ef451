//! Record trait: the contract every stored record type fulfils.

use crate::error::DomainResult;
use crate::id::RecordId;

/// A persistable record with an optional identity and a sparse-patch type.
///
/// The primary store and the search mirror are both generic over this trait;
/// implementations carry no persistence logic of their own.
pub trait Record: Clone + Send + Sync + 'static {
    /// Sparse attribute set for partial updates. Fields left `None` in the
    /// patch must not touch the stored value.
    type Patch: Clone + Send + Sync + 'static;

    /// Stable lowercase kind name, used for logging and route naming.
    const KIND: &'static str;

    /// Identifier; `None` until the primary store assigns one on create.
    fn id(&self) -> Option<RecordId>;

    /// Attach the store-assigned identifier. Called once per record lifetime.
    fn assign_id(&mut self, id: RecordId);

    /// Deterministic required-field validation. Runs before any store
    /// mutation; a failure means neither store was touched.
    fn validate(&self) -> DomainResult<()>;

    /// Overlay the patch onto `self`, field by field. Absent patch fields
    /// leave the current value unchanged.
    fn merge(&mut self, patch: Self::Patch);

    /// Flat textual projection of the record's set attributes.
    ///
    /// Feeds the search mirror's documents and sort-key extraction; unset
    /// optional attributes are omitted.
    fn fields(&self) -> Vec<(&'static str, String)>;
}
