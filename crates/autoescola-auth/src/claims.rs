//! Signed token payload.

use serde::{Deserialize, Serialize};

/// JWT claims shared by admin sessions and API bearer tokens.
///
/// # Fields
///
/// - `sub`: actor ID
/// - `name`, `email`: display data, so the session probe needs no lookup
/// - `role`: role at issuance time
/// - `aud`: universe the token belongs to (see [`crate::ADMIN_AUDIENCE`])
/// - `iat`, `exp`: Unix timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims<R> {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: R,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}
