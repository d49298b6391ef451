//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: infrastructure wiring (primary stores, search mirrors)
//! - `routes/`: HTTP routes + handlers (one file per record type)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app() -> Router {
    let services = Arc::new(services::build_services());

    routes::router()
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
