mod common;

use autoescola::autoescola_auth::{AdminRole, AppRole, Identity};
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{TestApp, body_json, get_request, location, setup_test_app, with_cookie};
use tower::ServiceExt;
use uuid::Uuid;

fn admin_cookie(app: &TestApp, role: AdminRole) -> String {
    let identity = Identity::new(Uuid::new_v4(), "Painel", "painel@local.dev", role);
    let token = app.state.admin_sessions.issue(&identity).unwrap();
    format!("admin-session={}", token)
}

async fn visit(app: &TestApp, path: &str, cookie: Option<&str>) -> axum::response::Response {
    let request = match cookie {
        Some(cookie) => with_cookie(get_request(path), cookie),
        None => get_request(path),
    };
    app.router.clone().oneshot(request).await.unwrap()
}

#[tokio::test]
async fn test_operator_is_sent_home_from_admin_only_pages() {
    let app = setup_test_app();
    let cookie = admin_cookie(&app, AdminRole::Operator);

    for path in ["/admin/plans", "/admin/audit", "/admin/payments"] {
        let response = visit(&app, path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&response).as_deref(), Some("/admin"), "{}", path);
    }

    for path in ["/admin", "/admin/instructors"] {
        let response = visit(&app, path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
    }
}

#[tokio::test]
async fn test_admin_reaches_every_page() {
    let app = setup_test_app();
    let cookie = admin_cookie(&app, AdminRole::Admin);

    for path in [
        "/admin",
        "/admin/instructors",
        "/admin/plans",
        "/admin/audit",
        "/admin/payments",
    ] {
        let response = visit(&app, path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
        let body = body_json(response).await;
        assert_eq!(body["page"], path);
        assert_eq!(body["admin"]["role"], "ADMIN");
    }
}

#[tokio::test]
async fn test_signed_in_admin_is_sent_away_from_login() {
    let app = setup_test_app();
    let cookie = admin_cookie(&app, AdminRole::Operator);

    let response = visit(&app, "/login", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/admin"));
}

#[tokio::test]
async fn test_guest_sees_login_and_is_sent_there_otherwise() {
    let app = setup_test_app();

    let response = visit(&app, "/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["page"], "/login");
    assert!(body.get("admin").is_none());

    for path in ["/admin", "/admin/plans", "/admin/instructors"] {
        let response = visit(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&response).as_deref(), Some("/login"), "{}", path);
    }
}

#[tokio::test]
async fn test_invalid_cookie_is_treated_as_missing() {
    let app = setup_test_app();
    let identity = Identity::new(Uuid::new_v4(), "Painel", "painel@local.dev", AdminRole::Admin);

    let expired = app
        .state
        .admin_sessions
        .issue_at(&identity, Utc::now() - Duration::hours(25))
        .unwrap();
    let valid = app.state.admin_sessions.issue(&identity).unwrap();
    let (head, signature) = valid.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{}.{}{}", head, flipped, &signature[1..]);

    for token in [expired.as_str(), tampered.as_str(), "garbage"] {
        let cookie = format!("admin-session={}", token);

        let response = visit(&app, "/admin", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response).as_deref(), Some("/login"));

        // Guest-only page stays reachable with a dead cookie.
        let response = visit(&app, "/login", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_api_token_is_not_an_admin_session() {
    let app = setup_test_app();
    let identity = Identity::new(Uuid::new_v4(), "Caio", "caio@example.com", AppRole::Admin);
    let api_token = app.state.api_tokens.issue(&identity).unwrap();

    let response = visit(&app, "/admin", Some(&format!("admin-session={}", api_token))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_admin_json_endpoints_answer_with_status_codes() {
    let app = setup_test_app();
    let id = Uuid::new_v4();

    let response = app
        .router
        .clone()
        .oneshot(common::json_request(
            "POST",
            &format!("/api/admin/instructors/{}/block", id),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Não autenticado");
}

#[tokio::test]
async fn test_unlisted_routes_are_untouched() {
    let app = setup_test_app();

    let response = visit(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = visit(&app, "/administrators", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
