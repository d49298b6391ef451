use axum::{Router, routing::get};

pub mod beneficiaries;
pub mod common;
pub mod communes;
pub mod localities;
pub mod parcels;
pub mod system;
pub mod tracking_sheets;

/// Router for all record-type route groups.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/communes", communes::router())
        .nest("/localities", localities::router())
        .nest("/parcels", parcels::router())
        .nest("/beneficiaries", beneficiaries::router())
        .nest("/tracking-sheets", tracking_sheets::router())
}
