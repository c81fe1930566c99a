use axum::{Router, routing::get};

use super::controller::show_page;
use crate::middleware::routes::{LANDING_PAGE, LOGIN_PAGE};
use crate::state::AppState;

pub const PAGES: [&str; 6] = [
    LOGIN_PAGE,
    LANDING_PAGE,
    "/admin/instructors",
    "/admin/plans",
    "/admin/audit",
    "/admin/payments",
];

pub fn init_panel_router() -> Router<AppState> {
    PAGES
        .into_iter()
        .fold(Router::new(), |router, page| router.route(page, get(show_page)))
}
