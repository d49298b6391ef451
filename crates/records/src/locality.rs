//! Locality: a village or neighbourhood inside a commune.

use aquareg_core::{DomainError, DomainResult, Record, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub struct Locality {
    pub id: Option<RecordId>,
    /// Display name; required.
    pub name: String,
    /// Grouping reference to the owning commune, if known.
    pub commune_id: Option<RecordId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Locality {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            commune_id: None,
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalityPatch {
    pub name: Option<String>,
    pub commune_id: Option<RecordId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Record for Locality {
    type Patch = LocalityPatch;

    const KIND: &'static str = "locality";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(())
    }

    fn merge(&mut self, patch: LocalityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(commune_id) = patch.commune_id {
            self.commune_id = Some(commune_id);
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = Some(latitude);
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = Some(longitude);
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("name", self.name.clone())];
        if let Some(commune_id) = self.commune_id {
            fields.push(("commune_id", commune_id.to_string()));
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
