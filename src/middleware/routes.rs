//! Route policy tables for both surfaces.

use autoescola_auth::{AdminRole, AppRole, RoutePolicy};

/// Entry route of the admin panel.
pub const LOGIN_PAGE: &str = "/login";
/// Where signed-in admins land, and where forbidden pages send them.
pub const LANDING_PAGE: &str = "/admin";

/// Admin panel pages and the admin JSON API, guarded by the session cookie.
pub fn admin_panel_policy() -> RoutePolicy<AdminRole> {
    use AdminRole::{Admin, Operator};

    RoutePolicy::new()
        .guest_only(LOGIN_PAGE)
        .allow(LANDING_PAGE, [Admin, Operator])
        .allow("/admin/plans", [Admin])
        .allow("/admin/audit", [Admin])
        .allow("/admin/payments", [Admin])
        .allow("/api/admin", [Admin, Operator])
        .allow("/api/admin/plans", [Admin])
}

/// Backend API, guarded by bearer tokens.
pub fn api_policy() -> RoutePolicy<AppRole> {
    use AppRole::{Admin, Instructor, Student};

    RoutePolicy::new()
        .public("/auth/login")
        .authenticated("/auth/profile")
        .allow("/users", [Admin])
        .allow("/instructors", [Admin, Instructor])
        .allow("/students", [Admin, Instructor])
        .allow("/vehicles", [Admin, Instructor])
        .allow("/lessons", [Admin, Instructor, Student])
}
