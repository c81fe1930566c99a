use autoescola_models::AdminView;
use axum::Json;
use axum::extract::OriginalUri;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::MaybeAdminSession;

#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse {
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminView>,
}

/// Admin panel page
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Page the admin may see", body = PageResponse),
        (status = 303, description = "Redirect to /login or /admin")
    ),
    security(("session_cookie" = [])),
    tag = "Admin Panel"
)]
#[instrument(skip(session))]
pub async fn show_page(uri: OriginalUri, session: MaybeAdminSession) -> Json<PageResponse> {
    let MaybeAdminSession(admin) = session;
    Json(PageResponse {
        page: uri.0.path().to_string(),
        admin: admin.map(AdminView::from),
    })
}
