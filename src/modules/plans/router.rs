use axum::{
    Router,
    routing::{post, put},
};

use super::controller::{create_plan, update_plan};
use crate::state::AppState;

pub fn init_plans_router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/plans", post(create_plan))
        .route("/api/admin/plans/{id}", put(update_plan))
}
