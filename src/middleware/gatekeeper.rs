//! Gatekeeper middleware.
//!
//! One middleware per surface, all driven by a [`RoutePolicy`] from the state:
//!
//! | Middleware | Token source | Denied caller gets |
//! |---|---|---|
//! | [`admin_panel_gate`] | session cookie | `303` to `/login` or `/admin` |
//! | [`admin_api_gate`] | session cookie | `401` / `403` JSON |
//! | [`api_gate`] | bearer header | `401` / `403` JSON |
//!
//! An invalid token is treated exactly like a missing one. The gatekeeper
//! never touches the database.
//!
//! ```rust,ignore
//! let pages = init_panel_router()
//!     .route_layer(middleware::from_fn_with_state(state.clone(), admin_panel_gate));
//! ```

use autoescola_auth::{Gate, Identity, Role, RoutePolicy, TokenIssuer};
use autoescola_core::AppError;
use autoescola_observability::{track_access_denied, track_token_rejected};
use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::middleware::auth::{bearer_token, session_token};
use crate::middleware::routes::{LANDING_PAGE, LOGIN_PAGE};
use crate::state::AppState;

/// How a surface answers callers it does not admit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Denial {
    Redirect,
    Json,
}

fn request_path(req: &Request) -> String {
    req.extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

fn evaluate<R: Role>(
    policy: &RoutePolicy<R>,
    issuer: &TokenIssuer<R>,
    path: &str,
    token: Option<String>,
    surface: &'static str,
) -> (Gate, Option<Identity<R>>) {
    if !policy.needs_identity(path) {
        return (Gate::Open, None);
    }

    let identity = token.and_then(|token| match issuer.verify(&token) {
        Ok(identity) => Some(identity),
        Err(e) => {
            tracing::debug!(surface, path, error = %e, "ignoring invalid token");
            track_token_rejected(surface);
            None
        }
    });

    (policy.check(path, identity.as_ref()), identity)
}

async fn enforce<R: Role>(
    gate: Gate,
    identity: Option<Identity<R>>,
    denial: Denial,
    surface: &'static str,
    mut req: Request,
    next: Next,
) -> Response {
    match gate {
        Gate::Open => next.run(req).await,
        Gate::Admit => {
            if let Some(identity) = identity {
                req.extensions_mut().insert(identity);
            }
            next.run(req).await
        }
        Gate::RedirectHome => Redirect::to(LANDING_PAGE).into_response(),
        Gate::Unauthenticated => match denial {
            Denial::Redirect => Redirect::to(LOGIN_PAGE).into_response(),
            Denial::Json => AppError::unauthenticated().into_response(),
        },
        Gate::Forbidden => {
            let role = identity.as_ref().map(|i| i.role.as_str()).unwrap_or("unknown");
            tracing::info!(surface, role, path = %req.uri().path(), "access denied");
            track_access_denied(surface, role);

            match denial {
                Denial::Redirect => Redirect::to(LANDING_PAGE).into_response(),
                Denial::Json => AppError::forbidden().into_response(),
            }
        }
    }
}

/// Admin panel pages: unauthenticated callers go to `/login`, forbidden ones to `/admin`.
pub async fn admin_panel_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = request_path(&req);
    let token = session_token(req.headers(), &state.session_config.cookie_name);
    let (gate, identity) = evaluate(
        &state.admin_routes,
        &state.admin_sessions,
        &path,
        token,
        "admin",
    );

    enforce(gate, identity, Denial::Redirect, "admin", req, next).await
}

/// Admin JSON endpoints: same cookie and table as the pages, JSON errors.
pub async fn admin_api_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = request_path(&req);
    let token = session_token(req.headers(), &state.session_config.cookie_name);
    let (gate, identity) = evaluate(
        &state.admin_routes,
        &state.admin_sessions,
        &path,
        token,
        "admin",
    );

    enforce(gate, identity, Denial::Json, "admin", req, next).await
}

/// Backend API: bearer tokens, JSON errors.
pub async fn api_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = request_path(&req);
    let token = bearer_token(req.headers());
    let (gate, identity) = evaluate(&state.api_routes, &state.api_tokens, &path, token, "api");

    enforce(gate, identity, Denial::Json, "api", req, next).await
}
