use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints reachable without a session. The redirect gate still runs
/// in front of these (it owns the authenticated-visitor-on-login-page rule),
/// but none of them requires session evidence to serve.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // GET /dang-nhap
        // The login form: the single auth-exempt page, rendered without chrome.
        .route("/dang-nhap", get(handlers::login_page))
        // POST /dang-nhap
        // Authenticates against the identity service; on success sets both
        // session cookies and redirects home.
        .route("/dang-nhap", post(handlers::login))
        // POST /dang-xuat
        // Clears both session cookies and redirects to the login page. Kept in
        // the public tier so logout works regardless of session state.
        .route("/dang-xuat", post(handlers::logout))
        // GET /api/menu
        // Navigation items for the current session's role. Degrades to an
        // empty list without a session, so it needs no gate protection.
        .route("/api/menu", get(handlers::menu))
}
