use serde::Serialize;

use crate::{auth::Role, gate::LOGIN_PATH, models::Profile};

/// MenuItem
///
/// One entry of the navigation sidebar. The path values are the same literal
/// contract the redirect gate protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
}

/// The admin navigation. `admin` and `super_admin` see the identical list.
pub const ADMIN_MENU: [MenuItem; 5] = [
    MenuItem {
        label: "Tổng quan",
        path: "/",
    },
    MenuItem {
        label: "Quản lý sinh viên",
        path: "/quan-ly-khach-hang",
    },
    MenuItem {
        label: "Quản lý tòa nhà & phòng",
        path: "/quan-ly-dai-ly",
    },
    MenuItem {
        label: "Quản lý hợp đồng & hóa đơn",
        path: "/quan-ly-don-hang",
    },
    MenuItem {
        label: "Đăng ký & bảo trì",
        path: "/quan-ly-doi-tac-dich-vu-dang-kiem",
    },
];

/// The student navigation: dashboard only.
pub const STUDENT_MENU: [MenuItem; 1] = [MenuItem {
    label: "Trang chủ",
    path: "/",
}];

/// menu_for_role
///
/// Static role → menu mapping. Any unrecognized or absent role yields the
/// empty list, never an error.
pub fn menu_for_role(role: Option<Role>) -> &'static [MenuItem] {
    match role {
        Some(Role::Admin) | Some(Role::SuperAdmin) => &ADMIN_MENU,
        Some(Role::Student) => &STUDENT_MENU,
        None => &[],
    }
}

/// is_auth_exempt
///
/// Auth-exempt routes render bare content with no chrome at all; today that
/// is only the login page.
pub fn is_auth_exempt(path: &str) -> bool {
    path == LOGIN_PATH
}

// --- Shell Rendering ---

fn render_sidebar(role: Role) -> String {
    let items = menu_for_role(Some(role))
        .iter()
        .map(|item| format!(r#"<li><a href="{}">{}</a></li>"#, item.path, item.label))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<aside id="sidebar"><nav><ul>
{items}
</ul></nav></aside>"#
    )
}

fn render_header(profile: &Profile) -> String {
    format!(
        r#"<header id="topbar"><span class="brand">KTX Admin</span><span class="who">{} ({})</span><form method="post" action="/dang-xuat"><button type="submit">Đăng xuất</button></form></header>"#,
        profile.email,
        profile.role.as_str()
    )
}

/// render_page
///
/// Composes the final HTML document for a page.
///
/// - Auth-exempt paths (login) get bare content, no chrome.
/// - Everything else gets the main shell; the header and sidebar render only
///   when the resolved role passes `is_admin`. An absent profile (missing
///   session, failed fetch) degrades to content-only rather than a crash or
///   an error page.
pub fn render_page(path: &str, profile: Option<&Profile>, title: &str, body: &str) -> String {
    let chrome = if is_auth_exempt(path) {
        String::new()
    } else {
        match profile {
            Some(p) if p.role.is_admin() => {
                format!("{}\n{}", render_header(p), render_sidebar(p.role))
            }
            // Student or unresolved profile: main shell without sidebar/header.
            _ => String::new(),
        }
    };

    format!(
        r#"<!doctype html>
<html lang="vi">
<head><meta charset="utf-8"><title>{title} — KTX Admin</title></head>
<body>
{chrome}
<main id="content">
{body}
</main>
</body>
</html>"#
    )
}
