//! HTTP API application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: dependency wiring (directory/catalog/store ports, lifecycle)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppDeps;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(deps: AppDeps) -> Router {
    let auth_state = middleware::AuthState {
        tokens: deps.tokens.clone(),
    };

    let app_services = Arc::new(services::AppServices::new(&deps));

    // Protected routes: bearer auth resolves the actor context first, then
    // handlers get the shared services.
    let protected = routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
            .layer(Extension(app_services)),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
