//! # Autoescola Config
//!
//! Configuration types for the Autoescola API, loaded from environment variables.
//!
//! - [`jwt`]: bearer token signing for the backend API
//! - [`session`]: admin panel session cookie signing and attributes
//! - [`database`]: Postgres connection settings
//! - [`cors`]: allowed origins
//! - [`server`]: bind address and environment
//!
//! Loaders that guard security-relevant values return [`ConfigError`] instead of
//! falling back to defaults, so the process refuses to start misconfigured.
//!
//! # Example
//!
//! ```ignore
//! use autoescola_config::{JwtConfig, SessionConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let session_config = SessionConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod server;
pub mod session;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;

/// Minimum accepted length, in bytes, of a signing secret.
pub const MIN_SECRET_LEN: usize = 32;

/// Default validity of both session cookies and bearer tokens (24 hours).
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 86_400;

/// Longest accepted validity of a session cookie or bearer token (365 days).
pub const MAX_TOKEN_EXPIRY_SECS: i64 = 365 * 86_400;

pub(crate) fn require_secret(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    let secret = lookup(var)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ConfigError::Missing(var))?;

    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::WeakSecret {
            var,
            min: MIN_SECRET_LEN,
        });
    }

    Ok(secret)
}

pub(crate) fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            value: raw,
        }),
    }
}

/// Reads a token lifetime in seconds, accepting `1..=MAX_TOKEN_EXPIRY_SECS`.
pub(crate) fn parse_expiry(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<i64, ConfigError> {
    let expiry = parse_or(lookup, var, DEFAULT_TOKEN_EXPIRY_SECS)?;
    if !(1..=MAX_TOKEN_EXPIRY_SECS).contains(&expiry) {
        return Err(ConfigError::Invalid {
            var,
            value: expiry.to_string(),
        });
    }
    Ok(expiry)
}
