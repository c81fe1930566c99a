use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{admin_login, admin_logout, admin_me};
use crate::state::AppState;

pub fn init_admin_auth_router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(admin_login))
        .route("/api/auth/me", get(admin_me))
        .route("/api/auth/logout", post(admin_logout))
}
