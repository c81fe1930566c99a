use std::convert::Infallible;

use autoescola_auth::{AdminRole, AppRole, Identity, TokenIssuer};
use autoescola_core::AppError;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::CookieJar;

use crate::state::AppState;

/// Raw session token from the admin session cookie.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Raw token from `Authorization: Bearer <token>`. The scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

/// Verified admin panel identity from the request extensions or the session cookie.
pub fn admin_identity(
    parts: &Parts,
    issuer: &TokenIssuer<AdminRole>,
    cookie_name: &str,
) -> Option<Identity<AdminRole>> {
    if let Some(identity) = parts.extensions.get::<Identity<AdminRole>>() {
        return Some(identity.clone());
    }

    let token = session_token(&parts.headers, cookie_name)?;
    issuer.verify(&token).ok()
}

/// Verified backend identity from the request extensions or the bearer header.
pub fn api_identity(parts: &Parts, issuer: &TokenIssuer<AppRole>) -> Option<Identity<AppRole>> {
    if let Some(identity) = parts.extensions.get::<Identity<AppRole>>() {
        return Some(identity.clone());
    }

    let token = bearer_token(&parts.headers)?;
    issuer.verify(&token).ok()
}

/// Extractor for the signed-in admin. Rejects with `401 Não autenticado`.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Identity<AdminRole>);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        admin_identity(
            parts,
            &state.admin_sessions,
            &state.session_config.cookie_name,
        )
        .map(AdminSession)
        .ok_or_else(AppError::unauthenticated)
    }
}

/// Like [`AdminSession`] but never rejects. Used by pages that render for guests too.
#[derive(Debug, Clone)]
pub struct MaybeAdminSession(pub Option<Identity<AdminRole>>);

impl FromRequestParts<AppState> for MaybeAdminSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAdminSession(admin_identity(
            parts,
            &state.admin_sessions,
            &state.session_config.cookie_name,
        )))
    }
}

/// Extractor for the bearer-authenticated backend user.
#[derive(Debug, Clone)]
pub struct ApiUser(pub Identity<AppRole>);

impl FromRequestParts<AppState> for ApiUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        api_identity(parts, &state.api_tokens)
            .map(ApiUser)
            .ok_or_else(AppError::unauthenticated)
    }
}
