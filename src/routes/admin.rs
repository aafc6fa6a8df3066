use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// The four management pages of the console. Session enforcement comes from the
/// redirect gate like every other protected path; on top of that, `create_router`
/// layers the role gate over this router, which (when enforcement is switched
/// on) redirects non-admin profiles back to the dashboard.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /quan-ly-khach-hang
        // Student management: records, room assignment, status.
        .route("/quan-ly-khach-hang", get(handlers::students_page))
        // GET /quan-ly-dai-ly
        // Building and room management: capacity, occupancy, floors.
        .route("/quan-ly-dai-ly", get(handlers::buildings_page))
        // GET /quan-ly-don-hang
        // Contract and bill management: leases, invoices, payment state.
        .route("/quan-ly-don-hang", get(handlers::contracts_page))
        // GET /quan-ly-doi-tac-dich-vu-dang-kiem
        // Registration rounds and maintenance requests.
        .route(
            "/quan-ly-doi-tac-dich-vu-dang-kiem",
            get(handlers::maintenance_page),
        )
}
