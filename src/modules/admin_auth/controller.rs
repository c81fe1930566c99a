use autoescola_core::{AppError, ErrorResponse};
use autoescola_models::{AdminLoginRequest, AdminSessionResponse, LogoutResponse};
use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use tracing::instrument;

use super::cookies::{clear_session_cookie, session_cookie};
use super::service::AdminAuthService;
use crate::middleware::auth::AdminSession;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Sign in to the admin panel
///
/// Sets the HTTP-only session cookie on success.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Signed in, session cookie set", body = AdminSessionResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Admin Session"
)]
#[instrument(skip(state, jar, dto))]
pub async fn admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<AdminLoginRequest>,
) -> Result<(CookieJar, Json<AdminSessionResponse>), AppError> {
    let (identity, token) =
        AdminAuthService::login(state.admins.as_ref(), &state.admin_sessions, dto).await?;

    let jar = jar.add(session_cookie(&state.session_config, token));
    Ok((
        jar,
        Json(AdminSessionResponse {
            admin: identity.into(),
        }),
    ))
}

/// Current admin session
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Signed-in admin", body = AdminSessionResponse),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Admin Session"
)]
#[instrument(skip(session))]
pub async fn admin_me(session: AdminSession) -> Json<AdminSessionResponse> {
    let AdminSession(identity) = session;
    Json(AdminSessionResponse {
        admin: identity.into(),
    })
}

/// Sign out of the admin panel
///
/// Clears the session cookie. The token itself stays valid until it expires.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = LogoutResponse)
    ),
    tag = "Admin Session"
)]
#[instrument(skip(state, jar))]
pub async fn admin_logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let jar = jar.add(clear_session_cookie(&state.session_config));
    (jar, Json(LogoutResponse { success: true }))
}
