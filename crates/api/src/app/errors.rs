use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tradelane_core::DomainError;
use tradelane_lifecycle::{InfraError, LifecycleError};

/// Map a lifecycle failure onto the wire.
///
/// Domain errors carry their context (the client can act on them);
/// infrastructure errors are logged and surfaced opaquely.
pub fn lifecycle_error_to_response(err: LifecycleError) -> axum::response::Response {
    match err {
        LifecycleError::Domain(e) => domain_error_to_response(e),
        LifecycleError::Infrastructure(e) => {
            tracing::error!(error = %e, "infrastructure failure");
            match e {
                InfraError::Store(_) => json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "internal storage failure",
                ),
                InfraError::Catalog(_) | InfraError::Directory(_) => json_error(
                    StatusCode::BAD_GATEWAY,
                    "upstream_error",
                    "upstream service failure",
                ),
            }
        }
    }
}

fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::Validation(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", message)
        }
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::Forbidden(_) => json_error(StatusCode::FORBIDDEN, "forbidden", message),
        DomainError::InvalidTransition { .. } => {
            json_error(StatusCode::BAD_REQUEST, "invalid_transition", message)
        }
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", message),
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
