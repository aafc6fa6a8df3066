use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    auth::CurrentUser,
    gate::{HOME_PATH, LOGIN_PATH},
    layout,
    models::LoginRequest,
    session,
};

// --- Pages ---

/// dashboard
///
/// [Protected] GET /: the landing page after login. Renders inside the main
/// shell; the sidebar appears only for admin roles.
pub async fn dashboard(CurrentUser(profile): CurrentUser) -> Html<String> {
    let body = "<h1>Tổng quan ký túc xá</h1>\n<p>Chọn một mục quản lý từ thanh điều hướng.</p>";
    Html(layout::render_page(HOME_PATH, profile.as_ref(), "Tổng quan", body))
}

/// students_page
///
/// [Admin] GET /quan-ly-khach-hang: student management shell.
pub async fn students_page(CurrentUser(profile): CurrentUser) -> Html<String> {
    let body = "<h1>Quản lý sinh viên</h1>\n<section id=\"students\"></section>";
    Html(layout::render_page(
        "/quan-ly-khach-hang",
        profile.as_ref(),
        "Quản lý sinh viên",
        body,
    ))
}

/// buildings_page
///
/// [Admin] GET /quan-ly-dai-ly: building and room management shell.
pub async fn buildings_page(CurrentUser(profile): CurrentUser) -> Html<String> {
    let body = "<h1>Quản lý tòa nhà & phòng</h1>\n<section id=\"buildings\"></section>";
    Html(layout::render_page(
        "/quan-ly-dai-ly",
        profile.as_ref(),
        "Quản lý tòa nhà & phòng",
        body,
    ))
}

/// contracts_page
///
/// [Admin] GET /quan-ly-don-hang: contract and bill management shell.
pub async fn contracts_page(CurrentUser(profile): CurrentUser) -> Html<String> {
    let body = "<h1>Quản lý hợp đồng & hóa đơn</h1>\n<section id=\"contracts\"></section>";
    Html(layout::render_page(
        "/quan-ly-don-hang",
        profile.as_ref(),
        "Quản lý hợp đồng & hóa đơn",
        body,
    ))
}

/// maintenance_page
///
/// [Admin] GET /quan-ly-doi-tac-dich-vu-dang-kiem: registration and
/// maintenance-request management shell.
pub async fn maintenance_page(CurrentUser(profile): CurrentUser) -> Html<String> {
    let body = "<h1>Đăng ký & bảo trì</h1>\n<section id=\"maintenance\"></section>";
    Html(layout::render_page(
        "/quan-ly-doi-tac-dich-vu-dang-kiem",
        profile.as_ref(),
        "Đăng ký & bảo trì",
        body,
    ))
}

/// login_page
///
/// [Public] GET /dang-nhap: the only auth-exempt page. The gate already
/// redirects authenticated visitors home, so this always renders the bare form.
pub async fn login_page() -> Html<String> {
    let body = r#"<h1>Đăng nhập</h1>
<form method="post" action="/dang-nhap">
<label>Email <input type="email" name="email" required></label>
<label>Mật khẩu <input type="password" name="password" required></label>
<button type="submit">Đăng nhập</button>
</form>"#;
    Html(layout::render_page(LOGIN_PATH, None, "Đăng nhập", body))
}

/// menu
///
/// [Public] GET /api/menu: the navigation items for the current session's
/// role, consumed by the console shell. Follows the same degradation rule as
/// the sidebar itself: no usable session, unknown role or a failed profile
/// fetch all yield the empty list, never an error.
pub async fn menu(CurrentUser(profile): CurrentUser) -> Json<serde_json::Value> {
    let items = layout::menu_for_role(profile.as_ref().map(|p| p.role));
    Json(serde_json::json!({ "items": items }))
}

// --- Actions ---

/// login
///
/// [Public] POST /dang-nhap: authenticates against the identity service,
/// persists the returned token pair as the two session cookies and redirects
/// home. The cookies ride on the redirect response itself, so the follow-up
/// navigation always re-reads fresh session state.
///
/// On failure no cookie is written and the client receives 401.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(credentials): Form<LoginRequest>,
) -> Result<Response, StatusCode> {
    let tokens = match state.identity.login(&credentials).await {
        Ok(tokens) => tokens,
        Err(e) => {
            tracing::info!(email = %credentials.email, error = %e, "login rejected");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    let jar = session::issue_cookies(jar, tokens);
    Ok((jar, Redirect::to(HOME_PATH)).into_response())
}

/// logout
///
/// [Public] POST /dang-xuat: expires both session cookies and redirects to the
/// login page, regardless of prior state. The redirect forces a full
/// navigation, so no stale authenticated chrome can linger client-side.
pub async fn logout(jar: CookieJar) -> Response {
    let jar = session::clear_cookies(jar);
    (jar, Redirect::to(LOGIN_PATH)).into_response()
}
