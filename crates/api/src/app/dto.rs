use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;

use aquareg_core::{Page, PageRequest, RecordId, SortCriterion, page::DEFAULT_PAGE_SIZE};
use aquareg_records::{
    Beneficiary, BeneficiaryPatch, Commune, CommunePatch, Locality, LocalityPatch, Parcel,
    ParcelPatch, SheetStatus, TrackingSheet, TrackingSheetPatch,
};

use crate::app::errors;

// -------------------------
// Pagination / search query params
// -------------------------

/// `?page=&size=&sort=field,dir[;field,dir]` on listing endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub sort: Option<String>,
}

impl PageQuery {
    pub fn into_page_request(self) -> Result<PageRequest, axum::response::Response> {
        build_page_request(self.page, self.size, self.sort)
    }
}

/// `?query=&page=&size=` on search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl SearchParams {
    pub fn into_parts(self) -> Result<(String, PageRequest), axum::response::Response> {
        let request = build_page_request(self.page, self.size, None)?;
        Ok((self.query, request))
    }
}

fn build_page_request(
    page: Option<usize>,
    size: Option<usize>,
    sort: Option<String>,
) -> Result<PageRequest, axum::response::Response> {
    let mut request = PageRequest::new(page.unwrap_or(0), size.unwrap_or(DEFAULT_PAGE_SIZE));

    if let Some(sort) = sort {
        let mut criteria = Vec::new();
        for part in sort.split(';').filter(|p| !p.trim().is_empty()) {
            let criterion: SortCriterion = part.parse().map_err(|e: aquareg_core::DomainError| {
                errors::json_error(StatusCode::BAD_REQUEST, "invalid_sort", e.to_string())
            })?;
            criteria.push(criterion);
        }
        request = request.with_sort(criteria);
    }

    Ok(request)
}

// -------------------------
// Request DTOs
// -------------------------
//
// Every attribute is optional on the wire so that missing required fields
// surface as domain validation errors (400), not body-rejection errors.

#[derive(Debug, Deserialize)]
pub struct CommuneRequest {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub population: Option<i64>,
}

impl CommuneRequest {
    pub fn into_record(self) -> Commune {
        Commune {
            id: self.id,
            name: self.name.unwrap_or_default(),
            code: self.code.unwrap_or_default(),
            population: self.population,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommunePatchRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub population: Option<i64>,
}

impl CommunePatchRequest {
    pub fn into_patch(self) -> CommunePatch {
        CommunePatch {
            name: self.name,
            code: self.code,
            population: self.population,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocalityRequest {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub commune_id: Option<RecordId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocalityRequest {
    pub fn into_record(self) -> Locality {
        Locality {
            id: self.id,
            name: self.name.unwrap_or_default(),
            commune_id: self.commune_id,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocalityPatchRequest {
    pub name: Option<String>,
    pub commune_id: Option<RecordId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocalityPatchRequest {
    pub fn into_patch(self) -> LocalityPatch {
        LocalityPatch {
            name: self.name,
            commune_id: self.commune_id,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ParcelRequest {
    pub id: Option<RecordId>,
    pub reference: Option<String>,
    pub locality_id: Option<RecordId>,
    pub area_m2: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ParcelRequest {
    pub fn into_record(self) -> Parcel {
        Parcel {
            id: self.id,
            reference: self.reference.unwrap_or_default(),
            locality_id: self.locality_id,
            area_m2: self.area_m2,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ParcelPatchRequest {
    pub reference: Option<String>,
    pub locality_id: Option<RecordId>,
    pub area_m2: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ParcelPatchRequest {
    pub fn into_patch(self) -> ParcelPatch {
        ParcelPatch {
            reference: self.reference,
            locality_id: self.locality_id,
            area_m2: self.area_m2,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BeneficiaryRequest {
    pub id: Option<RecordId>,
    pub full_name: Option<String>,
    pub parcel_id: Option<RecordId>,
    pub household_size: Option<i32>,
    pub phone: Option<String>,
}

impl BeneficiaryRequest {
    pub fn into_record(self) -> Beneficiary {
        Beneficiary {
            id: self.id,
            full_name: self.full_name.unwrap_or_default(),
            parcel_id: self.parcel_id,
            household_size: self.household_size,
            phone: self.phone,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BeneficiaryPatchRequest {
    pub full_name: Option<String>,
    pub parcel_id: Option<RecordId>,
    pub household_size: Option<i32>,
    pub phone: Option<String>,
}

impl BeneficiaryPatchRequest {
    pub fn into_patch(self) -> BeneficiaryPatch {
        BeneficiaryPatch {
            full_name: self.full_name,
            parcel_id: self.parcel_id,
            household_size: self.household_size,
            phone: self.phone,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TrackingSheetRequest {
    pub id: Option<RecordId>,
    pub reference: Option<String>,
    pub locality_id: Option<RecordId>,
    pub status: Option<SheetStatus>,
    pub opened_on: Option<NaiveDate>,
    pub closed_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl TrackingSheetRequest {
    pub fn into_record(self) -> TrackingSheet {
        TrackingSheet {
            id: self.id,
            reference: self.reference.unwrap_or_default(),
            locality_id: self.locality_id,
            status: self.status.unwrap_or_default(),
            opened_on: self.opened_on,
            closed_on: self.closed_on,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TrackingSheetPatchRequest {
    pub reference: Option<String>,
    pub locality_id: Option<RecordId>,
    pub status: Option<SheetStatus>,
    pub opened_on: Option<NaiveDate>,
    pub closed_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl TrackingSheetPatchRequest {
    pub fn into_patch(self) -> TrackingSheetPatch {
        TrackingSheetPatch {
            reference: self.reference,
            locality_id: self.locality_id,
            status: self.status,
            opened_on: self.opened_on,
            closed_on: self.closed_on,
            notes: self.notes,
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn commune_to_json(c: &Commune) -> serde_json::Value {
    serde_json::json!({
        "id": c.id.map(|id| id.to_string()),
        "name": c.name,
        "code": c.code,
        "population": c.population,
    })
}

pub fn locality_to_json(l: &Locality) -> serde_json::Value {
    serde_json::json!({
        "id": l.id.map(|id| id.to_string()),
        "name": l.name,
        "commune_id": l.commune_id.map(|id| id.to_string()),
        "latitude": l.latitude,
        "longitude": l.longitude,
    })
}

pub fn parcel_to_json(p: &Parcel) -> serde_json::Value {
    serde_json::json!({
        "id": p.id.map(|id| id.to_string()),
        "reference": p.reference,
        "locality_id": p.locality_id.map(|id| id.to_string()),
        "area_m2": p.area_m2,
        "latitude": p.latitude,
        "longitude": p.longitude,
    })
}

pub fn beneficiary_to_json(b: &Beneficiary) -> serde_json::Value {
    serde_json::json!({
        "id": b.id.map(|id| id.to_string()),
        "full_name": b.full_name,
        "parcel_id": b.parcel_id.map(|id| id.to_string()),
        "household_size": b.household_size,
        "phone": b.phone,
    })
}

pub fn tracking_sheet_to_json(s: &TrackingSheet) -> serde_json::Value {
    serde_json::json!({
        "id": s.id.map(|id| id.to_string()),
        "reference": s.reference,
        "locality_id": s.locality_id.map(|id| id.to_string()),
        "status": s.status.as_str(),
        "opened_on": s.opened_on.map(|d| d.to_string()),
        "closed_on": s.closed_on.map(|d| d.to_string()),
        "notes": s.notes,
    })
}

pub fn page_to_json<E>(
    page: Page<E>,
    to_json: fn(&E) -> serde_json::Value,
) -> serde_json::Value {
    serde_json::json!({
        "items": page.items.iter().map(to_json).collect::<Vec<_>>(),
        "page": page.page,
        "size": page.size,
        "total": page.total,
    })
}
