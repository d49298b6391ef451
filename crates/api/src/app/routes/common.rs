//! Shared handler plumbing, generic over the record type.
//!
//! Route files stay thin: parse inputs, delegate here, and the behavior is
//! identical across every record type.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use aquareg_core::{PageRequest, Record, RecordId};

use crate::app::errors;
use crate::app::services::Service;

/// Parse a path id, answering 400 on malformed input.
pub fn parse_id(raw: &str) -> Result<RecordId, Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid record id")
    })
}

pub fn create_record<E: Record>(
    svc: &Service<E>,
    record: E,
    to_json: fn(&E) -> serde_json::Value,
) -> Response {
    match svc.create(record) {
        Ok(written) => (StatusCode::CREATED, Json(to_json(&written.record))).into_response(),
        Err(e) => errors::sync_error_to_response(e),
    }
}

pub fn replace_record<E: Record>(
    svc: &Service<E>,
    path_id: RecordId,
    mut record: E,
    to_json: fn(&E) -> serde_json::Value,
) -> Response {
    match record.id() {
        Some(body_id) if body_id != path_id => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "id_mismatch",
                "payload id does not match the path id",
            );
        }
        Some(_) => {}
        None => record.assign_id(path_id),
    }

    match svc.update(record) {
        Ok(written) => (StatusCode::OK, Json(to_json(&written.record))).into_response(),
        Err(e) => errors::sync_error_to_response(e),
    }
}

pub fn patch_record<E: Record>(
    svc: &Service<E>,
    id: RecordId,
    patch: E::Patch,
    to_json: fn(&E) -> serde_json::Value,
) -> Response {
    match svc.partial_update(id, patch) {
        Ok(Some(written)) => (StatusCode::OK, Json(to_json(&written.record))).into_response(),
        Ok(None) => not_found::<E>(),
        Err(e) => errors::sync_error_to_response(e),
    }
}

pub fn get_record<E: Record>(
    svc: &Service<E>,
    id: RecordId,
    to_json: fn(&E) -> serde_json::Value,
) -> Response {
    match svc.find_one(id) {
        Ok(Some(record)) => (StatusCode::OK, Json(to_json(&record))).into_response(),
        Ok(None) => not_found::<E>(),
        Err(e) => errors::sync_error_to_response(e),
    }
}

pub fn list_records<E: Record>(
    svc: &Service<E>,
    request: &PageRequest,
    to_json: fn(&E) -> serde_json::Value,
) -> Response {
    match svc.find_all(request) {
        Ok(page) => (
            StatusCode::OK,
            Json(crate::app::dto::page_to_json(page, to_json)),
        )
            .into_response(),
        Err(e) => errors::sync_error_to_response(e),
    }
}

pub fn delete_record<E: Record>(svc: &Service<E>, id: RecordId) -> Response {
    // Idempotent: the mirror outcome never changes the caller-visible status.
    match svc.delete(id) {
        Ok(_status) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::sync_error_to_response(e),
    }
}

pub fn search_records<E: Record>(
    svc: &Service<E>,
    query: &str,
    request: &PageRequest,
    to_json: fn(&E) -> serde_json::Value,
) -> Response {
    match svc.search(query, request) {
        Ok(page) => (
            StatusCode::OK,
            Json(crate::app::dto::page_to_json(page, to_json)),
        )
            .into_response(),
        Err(e) => errors::sync_error_to_response(e),
    }
}

fn not_found<E: Record>() -> Response {
    errors::json_error(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("{} not found", E::KIND),
    )
}
