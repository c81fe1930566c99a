use std::fmt;

use crate::{ConfigError, parse_expiry, require_secret};

pub const DEFAULT_COOKIE_NAME: &str = "admin-session";

/// Admin panel session configuration: signing key plus cookie attributes.
#[derive(Clone)]
pub struct SessionConfig {
    pub secret: String,
    /// Session lifetime in seconds; also used as the cookie `Max-Age`.
    pub expiry: i64,
    pub cookie_name: String,
    /// Emit the `Secure` cookie attribute.
    pub secure: bool,
}

impl SessionConfig {
    /// Loads `ADMIN_SESSION_SECRET` (required), `ADMIN_SESSION_EXPIRY`,
    /// `ADMIN_SESSION_COOKIE` and derives `secure` from `APP_ENV=production`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let expiry = parse_expiry(&lookup, "ADMIN_SESSION_EXPIRY")?;

        let cookie_name = lookup("ADMIN_SESSION_COOKIE")
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        let secure = lookup("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            secret: require_secret(&lookup, "ADMIN_SESSION_SECRET")?,
            expiry,
            cookie_name,
            secure,
        })
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("expiry", &self.expiry)
            .field("cookie_name", &self.cookie_name)
            .field("secure", &self.secure)
            .finish()
    }
}
