//! Parcel: a surveyed plot attached to a locality.

use aquareg_core::{DomainError, DomainResult, Record, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    pub id: Option<RecordId>,
    /// Cadastral reference; required.
    pub reference: String,
    pub locality_id: Option<RecordId>,
    pub area_m2: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Parcel {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            id: None,
            reference: reference.into(),
            locality_id: None,
            area_m2: None,
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParcelPatch {
    pub reference: Option<String>,
    pub locality_id: Option<RecordId>,
    pub area_m2: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Record for Parcel {
    type Patch = ParcelPatch;

    const KIND: &'static str = "parcel";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn validate(&self) -> DomainResult<()> {
        if self.reference.trim().is_empty() {
            return Err(DomainError::validation("reference cannot be empty"));
        }
        if let Some(area) = self.area_m2 {
            if area < 0.0 {
                return Err(DomainError::validation("area_m2 cannot be negative"));
            }
        }
        Ok(())
    }

    fn merge(&mut self, patch: ParcelPatch) {
        if let Some(reference) = patch.reference {
            self.reference = reference;
        }
        if let Some(locality_id) = patch.locality_id {
            self.locality_id = Some(locality_id);
        }
        if let Some(area_m2) = patch.area_m2 {
            self.area_m2 = Some(area_m2);
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = Some(latitude);
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = Some(longitude);
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("reference", self.reference.clone())];
        if let Some(locality_id) = self.locality_id {
            fields.push(("locality_id", locality_id.to_string()));
        }
        if let Some(area_m2) = self.area_m2 {
            fields.push(("area_m2", area_m2.to_string()));
        }
        if let Some(latitude) = self.latitude {
            fields.push(("latitude", latitude.to_string()));
        }
        if let Some(longitude) = self.longitude {
            fields.push(("longitude", longitude.to_string()));
        }
        fields
    }
}
