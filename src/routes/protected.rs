use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Protected Router Module
///
/// Pages that require a valid session but no particular role. The redirect gate
/// wrapping the whole router is what enforces the session requirement; handlers
/// here only decide what to render for whoever got through.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // The dashboard. Any authenticated role lands here; the sidebar and
        // header render only for admin roles.
        .route("/", get(handlers::dashboard))
}
