use axum::Router;

pub mod orders;
pub mod system;

/// All protected routes.
pub fn router() -> Router {
    orders::router()
}
