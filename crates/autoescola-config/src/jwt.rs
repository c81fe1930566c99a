use std::fmt;

use crate::{ConfigError, parse_expiry, require_secret};

/// Signing configuration for backend API bearer tokens.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub expiry: i64,
}

impl JwtConfig {
    /// Loads `JWT_SECRET` (required) and `JWT_EXPIRY` (default: 1 day).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let expiry = parse_expiry(&lookup, "JWT_EXPIRY")?;

        Ok(Self {
            secret: require_secret(&lookup, "JWT_SECRET")?,
            expiry,
        })
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry", &self.expiry)
            .finish()
    }
}
