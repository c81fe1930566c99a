use axum::{Router, routing::post};

use super::controller::{
    approve_instructor, block_instructor, reject_instructor, unblock_instructor,
};
use crate::state::AppState;

pub fn init_instructors_router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/instructors/{id}/approve", post(approve_instructor))
        .route("/api/admin/instructors/{id}/reject", post(reject_instructor))
        .route("/api/admin/instructors/{id}/block", post(block_instructor))
        .route("/api/admin/instructors/{id}/unblock", post(unblock_instructor))
}
