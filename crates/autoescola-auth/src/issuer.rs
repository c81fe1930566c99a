//! Token issuance and verification.
//!
//! A [`TokenIssuer`] signs and verifies compact HS256 JWTs for one role
//! universe. Two instances exist per process:
//!
//! - `TokenIssuer<AdminRole>` for admin panel sessions (cookie transport),
//!   audience [`ADMIN_AUDIENCE`];
//! - `TokenIssuer<AppRole>` for backend API bearer tokens, audience
//!   [`API_AUDIENCE`].
//!
//! Keys are derived once at construction and the issuer is shared read-only
//! afterwards. Tokens cannot be revoked; they stop working when they expire.
//!
//! Every verification failure (malformed structure, bad signature, wrong
//! audience, unknown role, expired) is reported as the single
//! [`TokenError::InvalidToken`] so callers cannot leak which check failed.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use autoescola_config::{JwtConfig, SessionConfig};

use crate::claims::Claims;
use crate::identity::Identity;
use crate::roles::{AdminRole, AppRole, Role};

/// Audience stamped into admin panel session tokens.
pub const ADMIN_AUDIENCE: &str = "autoescola-admin";
/// Audience stamped into backend API bearer tokens.
pub const API_AUDIENCE: &str = "autoescola-api";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidToken,

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("token expiry is out of range")]
    ExpiryOutOfRange,
}

pub struct TokenIssuer<R> {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
    audience: &'static str,
    _role: PhantomData<fn() -> R>,
}

impl<R: Role> TokenIssuer<R> {
    /// Creates an issuer signing with `secret`, issuing tokens valid for `validity`
    /// and accepting only tokens stamped with `audience`.
    pub fn new(secret: &[u8], validity: Duration, audience: &'static str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "aud"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            validity,
            audience,
            _role: PhantomData,
        }
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    pub fn audience(&self) -> &'static str {
        self.audience
    }

    /// Signs a token for `identity`, valid from now for the configured window.
    pub fn issue(&self, identity: &Identity<R>) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    /// Signs a token for `identity` as if issued at `issued_at`.
    pub fn issue_at(
        &self,
        identity: &Identity<R>,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(self.validity)
            .ok_or(TokenError::ExpiryOutOfRange)?;

        let claims = Claims {
            sub: identity.id.to_string(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            role: identity.role,
            aud: self.audience.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(TokenError::Signing)
    }

    /// Checks signature, audience and expiry, returning the embedded identity.
    pub fn verify(&self, token: &str) -> Result<Identity<R>, TokenError> {
        let claims = decode::<Claims<R>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(audience = self.audience, error = %e, "token rejected");
                TokenError::InvalidToken
            })?
            .claims;

        let id = Uuid::parse_str(&claims.sub).map_err(|_| {
            tracing::debug!(audience = self.audience, "token subject is not a uuid");
            TokenError::InvalidToken
        })?;

        Ok(Identity {
            id,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        })
    }
}

impl TokenIssuer<AdminRole> {
    pub fn admin_sessions(config: &SessionConfig) -> Self {
        Self::new(
            config.secret.as_bytes(),
            validity_from_secs(config.expiry),
            ADMIN_AUDIENCE,
        )
    }
}

impl TokenIssuer<AppRole> {
    pub fn api_tokens(config: &JwtConfig) -> Self {
        Self::new(
            config.secret.as_bytes(),
            validity_from_secs(config.expiry),
            API_AUDIENCE,
        )
    }
}

/// Saturates instead of panicking on values chrono cannot represent.
fn validity_from_secs(secs: i64) -> Duration {
    Duration::try_seconds(secs).unwrap_or(Duration::MAX)
}

impl<R> fmt::Debug for TokenIssuer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("audience", &self.audience)
            .field("validity", &self.validity)
            .finish_non_exhaustive()
    }
}
