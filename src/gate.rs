use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    auth::{self, CurrentUser, SessionEvidence},
};

// --- Route Table ---

/// The home path a freshly authenticated operator lands on.
pub const HOME_PATH: &str = "/";

/// The single auth-exempt login path.
pub const LOGIN_PATH: &str = "/dang-nhap";

/// Protected paths, as a literal contract. Protection is binary: driven by
/// session evidence, not by the role the token encodes. No per-route role
/// granularity exists at this layer.
pub const PROTECTED_PATHS: [&str; 5] = [
    "/",
    "/quan-ly-khach-hang",
    "/quan-ly-dai-ly",
    "/quan-ly-don-hang",
    "/quan-ly-doi-tac-dich-vu-dang-kiem",
];

/// Admin-only pages: every protected path except the dashboard. Only consulted
/// by the role gate, and only when enforcement is switched on.
pub const ADMIN_PATHS: [&str; 4] = [
    "/quan-ly-khach-hang",
    "/quan-ly-dai-ly",
    "/quan-ly-don-hang",
    "/quan-ly-doi-tac-dich-vu-dang-kiem",
];

pub fn is_protected(path: &str) -> bool {
    PROTECTED_PATHS.contains(&path)
}

pub fn is_admin_page(path: &str) -> bool {
    ADMIN_PATHS.contains(&path)
}

// --- Gate Evaluation ---

/// GateDecision
///
/// The outcome of one gate evaluation. Protected→login is permanent (308,
/// cacheable by clients and CDNs), login→home is temporary (307, re-checked
/// on every visit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through to the page.
    Pass,
    /// Permanent redirect to the login path.
    ToLogin,
    /// Temporary redirect to home.
    ToHome,
}

/// evaluate
///
/// The pure decision function of the Edge Redirect Gate, evaluated once per
/// request before any page renders. Rule order matters:
/// (a) login path with a valid session → send the operator home;
/// (b) protected path without a valid session → send them to login;
/// (c) everything else passes.
///
/// `Invalid` evidence (cookie present, token bad) counts as unauthenticated on
/// protected paths but never redirects away from the login page; a forged or
/// expired cookie must not lock the operator out of logging in again.
pub fn evaluate(path: &str, evidence: SessionEvidence) -> GateDecision {
    if path == LOGIN_PATH && evidence == SessionEvidence::Valid {
        return GateDecision::ToHome;
    }

    if is_protected(path) && evidence != SessionEvidence::Valid {
        return GateDecision::ToLogin;
    }

    GateDecision::Pass
}

// --- Middleware ---

/// redirect_gate
///
/// The middleware stage wrapping the entire router. Derives session evidence
/// from the request cookies (validating token signature and expiry, see
/// `auth::session_evidence`), evaluates the route table and either redirects or
/// lets the request proceed. Stateless; no side effect beyond the redirect.
pub async fn redirect_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let jar = CookieJar::from_headers(request.headers());
    let evidence = auth::session_evidence(&jar, &state.config);

    match evaluate(&path, evidence) {
        GateDecision::Pass => next.run(request).await,
        GateDecision::ToLogin => {
            tracing::debug!(%path, ?evidence, "gate: redirecting to login");
            Redirect::permanent(LOGIN_PATH).into_response()
        }
        GateDecision::ToHome => {
            tracing::debug!(%path, "gate: authenticated visit to login, redirecting home");
            Redirect::temporary(HOME_PATH).into_response()
        }
    }
}

/// role_gate
///
/// Layered on the admin page routes, behind the `enforce_role_gate` toggle.
/// When enforcement is on, a non-admin profile requesting an admin-only page
/// is redirected to the dashboard. When enforcement is off, or the profile is
/// absent (the layout already degrades to no chrome), the request passes
/// untouched.
pub async fn role_gate(
    State(state): State<AppState>,
    user: CurrentUser,
    mut request: Request,
    next: Next,
) -> Response {
    // Cache the resolved session in the request extensions so the page
    // handler's `CurrentUser` extractor reuses it instead of validating the
    // token and fetching the profile a second time.
    request.extensions_mut().insert(user.clone());

    if !state.config.enforce_role_gate {
        return next.run(request).await;
    }

    if let Some(profile) = &user.0 {
        if !profile.role.is_admin() && is_admin_page(request.uri().path()) {
            tracing::info!(role = profile.role.as_str(), path = request.uri().path(),
                "role gate: non-admin on admin page, redirecting home");
            return Redirect::temporary(HOME_PATH).into_response();
        }
    }

    next.run(request).await
}
