use autoescola_core::{AppError, ErrorResponse};
use autoescola_models::{InstructorAction, InstructorResponse, StatusChangeRequest};
use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use super::service::InstructorService;
use crate::middleware::auth::AdminSession;
use crate::state::AppState;
use crate::validator::ValidatedJson;

async fn apply(
    state: AppState,
    AdminSession(actor): AdminSession,
    id: Uuid,
    action: InstructorAction,
    dto: StatusChangeRequest,
) -> Result<Json<InstructorResponse>, AppError> {
    let instructor = InstructorService::change_status(
        state.instructors.as_ref(),
        state.writes.as_ref(),
        &actor,
        id,
        action,
        dto,
    )
    .await?;

    Ok(Json(InstructorResponse { instructor }))
}

/// Approve an instructor
#[utoipa::path(
    post,
    path = "/api/admin/instructors/{id}/approve",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    request_body = StatusChangeRequest,
    responses(
        (status = 200, description = "Instructor approved", body = InstructorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 404, description = "Instructor not found", body = ErrorResponse),
        (status = 409, description = "Not allowed from the current status", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Admin Instructors"
)]
#[instrument(skip(state, session, dto))]
pub async fn approve_instructor(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<StatusChangeRequest>,
) -> Result<Json<InstructorResponse>, AppError> {
    apply(state, session, id, InstructorAction::Approve, dto).await
}

/// Reject an instructor
#[utoipa::path(
    post,
    path = "/api/admin/instructors/{id}/reject",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    request_body = StatusChangeRequest,
    responses(
        (status = 200, description = "Instructor rejected", body = InstructorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 404, description = "Instructor not found", body = ErrorResponse),
        (status = 409, description = "Not allowed from the current status", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Admin Instructors"
)]
#[instrument(skip(state, session, dto))]
pub async fn reject_instructor(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<StatusChangeRequest>,
) -> Result<Json<InstructorResponse>, AppError> {
    apply(state, session, id, InstructorAction::Reject, dto).await
}

/// Block an instructor
#[utoipa::path(
    post,
    path = "/api/admin/instructors/{id}/block",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    request_body = StatusChangeRequest,
    responses(
        (status = 200, description = "Instructor blocked", body = InstructorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 404, description = "Instructor not found", body = ErrorResponse),
        (status = 409, description = "Not allowed from the current status", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Admin Instructors"
)]
#[instrument(skip(state, session, dto))]
pub async fn block_instructor(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<StatusChangeRequest>,
) -> Result<Json<InstructorResponse>, AppError> {
    apply(state, session, id, InstructorAction::Block, dto).await
}

/// Unblock an instructor
#[utoipa::path(
    post,
    path = "/api/admin/instructors/{id}/unblock",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    request_body = StatusChangeRequest,
    responses(
        (status = 200, description = "Instructor unblocked", body = InstructorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 404, description = "Instructor not found", body = ErrorResponse),
        (status = 409, description = "Not allowed from the current status", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Admin Instructors"
)]
#[instrument(skip(state, session, dto))]
pub async fn unblock_instructor(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<StatusChangeRequest>,
) -> Result<Json<InstructorResponse>, AppError> {
    apply(state, session, id, InstructorAction::Unblock, dto).await
}
