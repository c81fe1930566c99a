#![allow(dead_code)]

use std::sync::Arc;

use autoescola::router::init_router_with;
use autoescola::state::AppState;
use autoescola::testing::{MemoryStore, test_state};
use axum::body::Body;
use axum::http::{Request, Response, header};
use axum::routing::get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{Value, json};

pub const PASSWORD: &str = "admin123";

/// Stand-in backend resources so the bearer route table can be exercised.
fn api_resources() -> Router<AppState> {
    ["/users", "/instructors", "/students", "/vehicles", "/lessons"]
        .into_iter()
        .fold(Router::new(), |router, path| {
            router.route(
                path,
                get(move || async move { Json(json!({ "resource": path })) }),
            )
        })
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
    pub router: Router,
}

pub fn setup_test_app() -> TestApp {
    let store = MemoryStore::new();
    let state = test_state(store.clone());
    let router = init_router_with(state.clone(), api_resources());
    TestApp {
        store,
        state,
        router,
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    request
}

pub fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );
    request
}

/// The raw `Set-Cookie` header of a response.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// `name=value` pair of a `Set-Cookie` header, ready to send back as `Cookie`.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().trim().to_string()
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
