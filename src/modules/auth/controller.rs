use autoescola_core::{AppError, ErrorResponse};
use autoescola_models::{LoginRequest, LoginResponse, UserView};
use axum::Json;
use axum::extract::State;
use tracing::instrument;

use super::service::AuthService;
use crate::middleware::auth::ApiUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(state.users.as_ref(), &state.api_tokens, dto).await?;
    Ok(Json(response))
}

/// Profile of the bearer of the token
#[utoipa::path(
    get,
    path = "/auth/profile",
    responses(
        (status = 200, description = "Authenticated user", body = UserView),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(user))]
pub async fn get_profile(user: ApiUser) -> Json<UserView> {
    let ApiUser(identity) = user;
    Json(identity.into())
}
