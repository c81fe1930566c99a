use crate::ConfigError;

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Origins allowed to call the API with credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Loads the comma-separated `ALLOWED_ORIGINS` list.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Every entry must be an explicit `http` or `https` origin. A wildcard is
    /// refused because session cookies are sent cross-origin.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string());

        let allowed_origins = raw
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                if is_explicit_origin(origin) {
                    Ok(origin.to_string())
                } else {
                    Err(ConfigError::Invalid {
                        var: "ALLOWED_ORIGINS",
                        value: origin.to_string(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { allowed_origins })
    }
}

fn is_explicit_origin(origin: &str) -> bool {
    let host = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"));

    match host {
        Some(host) => {
            !host.is_empty()
                && !host.contains(['*', '/'])
                && host.bytes().all(|b| b.is_ascii_graphic())
        }
        None => false,
    }
}
