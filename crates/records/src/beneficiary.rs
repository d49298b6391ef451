//! Beneficiary: a household registered against a parcel.

use aquareg_core::{DomainError, DomainResult, Record, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub struct Beneficiary {
    pub id: Option<RecordId>,
    /// Head-of-household full name; required.
    pub full_name: String,
    pub parcel_id: Option<RecordId>,
    pub household_size: Option<i32>,
    pub phone: Option<String>,
}

impl Beneficiary {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            parcel_id: None,
            household_size: None,
            phone: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeneficiaryPatch {
    pub full_name: Option<String>,
    pub parcel_id: Option<RecordId>,
    pub household_size: Option<i32>,
    pub phone: Option<String>,
}

impl Record for Beneficiary {
    type Patch = BeneficiaryPatch;

    const KIND: &'static str = "beneficiary";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn validate(&self) -> DomainResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(DomainError::validation("full_name cannot be empty"));
        }
        if let Some(size) = self.household_size {
            if size < 1 {
                return Err(DomainError::validation(
                    "household_size must be at least 1",
                ));
            }
        }
        Ok(())
    }

    fn merge(&mut self, patch: BeneficiaryPatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(parcel_id) = patch.parcel_id {
            self.parcel_id = Some(parcel_id);
        }
        if let Some(household_size) = patch.household_size {
            self.household_size = Some(household_size);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("full_name", self.full_name.clone())];
        if let Some(parcel_id) = self.parcel_id {
            fields.push(("parcel_id", parcel_id.to_string()));
        }
        if let Some(household_size) = self.household_size {
            fields.push(("household_size", household_size.to_string()));
        }
        if let Some(phone) = &self.phone {
            fields.push(("phone", phone.clone()));
        }
        fields
    }
}
