use std::any::Any;

use autoescola_core::AppError;
use autoescola_observability::{logging_middleware, metrics_middleware};
use axum::http::{HeaderValue, Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::middleware::gatekeeper::{admin_api_gate, admin_panel_gate, api_gate};
use crate::modules::admin_auth::router::init_admin_auth_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::instructors::router::init_instructors_router;
use crate::modules::panel::router::init_panel_router;
use crate::modules::plans::router::init_plans_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    init_router_with(state, Router::new())
}

/// Builds the application router.
///
/// `api_resources` are extra backend routes (users, instructors, lessons...)
/// that are mounted behind the bearer gate next to `/auth`.
pub fn init_router_with(state: AppState, api_resources: Router<AppState>) -> Router {
    let panel = init_panel_router()
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_panel_gate));

    let admin_api = Router::new()
        .merge(init_instructors_router())
        .merge(init_plans_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_api_gate));

    let api = init_auth_router()
        .merge(api_resources)
        .route_layer(middleware::from_fn_with_state(state.clone(), api_gate));

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .merge(init_admin_auth_router())
        .merge(panel)
        .merge(admin_api)
        .merge(api);

    if let Some(handle) = state.metrics.clone() {
        router = router.route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        );
    }

    router
        .with_state(state.clone())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, test_state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_is_public() {
        let app = init_router(test_state(MemoryStore::new()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_metrics_route_absent_without_handle() {
        let app = init_router(test_state(MemoryStore::new()));
        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_panic_becomes_generic_500() {
        async fn boom() -> &'static str {
            panic!("kaboom")
        }

        let resources = Router::new().route("/boom", get(boom));
        let app = init_router_with(test_state(MemoryStore::new()), resources);
        let response = app
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Erro interno do servidor");
    }
}
