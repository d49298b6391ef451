use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    routing::{get, post},
};

use crate::app::dto;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create).get(list))
        .route("/search", get(search))
        .route(
            "/:id",
            get(get_one).put(replace).patch(patch_one).delete(remove),
        )
}

async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BeneficiaryRequest>,
) -> axum::response::Response {
    common::create_record(&services.beneficiaries, body.into_record(), dto::beneficiary_to_json)
}

async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::PageQuery>,
) -> axum::response::Response {
    let request = match params.into_page_request() {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    common::list_records(&services.beneficiaries, &request, dto::beneficiary_to_json)
}

async fn search(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    let (query, request) = match params.into_parts() {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    common::search_records(&services.beneficiaries, &query, &request, dto::beneficiary_to_json)
}

async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    common::get_record(&services.beneficiaries, id, dto::beneficiary_to_json)
}

async fn replace(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::BeneficiaryRequest>,
) -> axum::response::Response {
    let id = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    common::replace_record(
        &services.beneficiaries,
        id,
        body.into_record(),
        dto::beneficiary_to_json,
    )
}

async fn patch_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::BeneficiaryPatchRequest>,
) -> axum::response::Response {
    let id = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    common::patch_record(
        &services.beneficiaries,
        id,
        body.into_patch(),
        dto::beneficiary_to_json,
    )
}

async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    common::delete_record(&services.beneficiaries, id)
}
