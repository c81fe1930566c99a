use autoescola_core::{AppError, ErrorResponse};
use autoescola_models::{CreatePlanDto, PlanResponse, UpdatePlanDto};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::service::PlanService;
use crate::middleware::auth::AdminSession;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a subscription plan
#[utoipa::path(
    post,
    path = "/api/admin/plans",
    request_body = CreatePlanDto,
    responses(
        (status = 201, description = "Plan created", body = PlanResponse),
        (status = 400, description = "Invalid plan", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "ADMIN role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Admin Plans"
)]
#[instrument(skip(state, session))]
pub async fn create_plan(
    State(state): State<AppState>,
    session: AdminSession,
    ValidatedJson(dto): ValidatedJson<CreatePlanDto>,
) -> Result<(StatusCode, Json<PlanResponse>), AppError> {
    let AdminSession(actor) = session;
    let plan = PlanService::create_plan(state.writes.as_ref(), &actor, dto).await?;
    Ok((StatusCode::CREATED, Json(PlanResponse { plan })))
}

/// Update a subscription plan
#[utoipa::path(
    put,
    path = "/api/admin/plans/{id}",
    params(("id" = Uuid, Path, description = "Plan ID")),
    request_body = UpdatePlanDto,
    responses(
        (status = 200, description = "Plan updated", body = PlanResponse),
        (status = 400, description = "Invalid changes", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "ADMIN role required", body = ErrorResponse),
        (status = 404, description = "Plan not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Admin Plans"
)]
#[instrument(skip(state, session))]
pub async fn update_plan(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePlanDto>,
) -> Result<Json<PlanResponse>, AppError> {
    let AdminSession(actor) = session;
    let plan = PlanService::update_plan(state.writes.as_ref(), &actor, id, dto).await?;
    Ok(Json(PlanResponse { plan }))
}
