//! Tracking sheet: the work-order follow-up record for a locality.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use aquareg_core::{DomainError, DomainResult, Record, RecordId};

/// Lifecycle status of a tracking sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetStatus {
    #[default]
    Open,
    #[serde(rename = "in_progress")]
    InProgress,
    Closed,
}

impl SheetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetStatus::Open => "open",
            SheetStatus::InProgress => "in_progress",
            SheetStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSheet {
    pub id: Option<RecordId>,
    /// Work-order reference; required.
    pub reference: String,
    pub locality_id: Option<RecordId>,
    pub status: SheetStatus,
    pub opened_on: Option<NaiveDate>,
    pub closed_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl TrackingSheet {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            id: None,
            reference: reference.into(),
            locality_id: None,
            status: SheetStatus::Open,
            opened_on: None,
            closed_on: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingSheetPatch {
    pub reference: Option<String>,
    pub locality_id: Option<RecordId>,
    pub status: Option<SheetStatus>,
    pub opened_on: Option<NaiveDate>,
    pub closed_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Record for TrackingSheet {
    type Patch = TrackingSheetPatch;

    const KIND: &'static str = "tracking-sheet";

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
        // A sheet cannot close before it opened.
        if let (Some(opened), Some(closed)) = (self.opened_on, self.closed_on) {
            if closed < opened {
                return Err(DomainError::validation(
                    "closed_on cannot precede opened_on",
                ));
            }
        }
        Ok(())
    }

    fn merge(&mut self, patch: TrackingSheetPatch) {
        if let Some(reference) = patch.reference {
            self.reference = reference;
        }
        if let Some(locality_id) = patch.locality_id {
            self.locality_id = Some(locality_id);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(opened_on) = patch.opened_on {
            self.opened_on = Some(opened_on);
        }
        if let Some(closed_on) = patch.closed_on {
            self.closed_on = Some(closed_on);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("reference", self.reference.clone()),
            ("status", self.status.as_str().to_string()),
        ];
        if let Some(locality_id) = self.locality_id {
            fields.push(("locality_id", locality_id.to_string()));
        }
        if let Some(opened_on) = self.opened_on {
            fields.push(("opened_on", opened_on.to_string()));
        }
        if let Some(closed_on) = self.closed_on {
            fields.push(("closed_on", closed_on.to_string()));
        }
        if let Some(notes) = &self.notes {
            fields.push(("notes", notes.clone()));
        }
        fields
    }
}
