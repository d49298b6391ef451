use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use aquareg_infra::{SearchError, SyncError};

pub fn sync_error_to_response(err: SyncError) -> axum::response::Response {
    match err {
        SyncError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        SyncError::Conflict(msg) => json_error(StatusCode::BAD_REQUEST, "conflict", msg),
        SyncError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        SyncError::Store(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
        SyncError::Search(SearchError::InvalidQuery(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_query", msg)
        }
        SyncError::Search(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "search_error",
            e.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
