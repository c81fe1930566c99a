use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A verified actor.
///
/// Built from token claims after signature and expiry checks, then trusted for
/// the remainder of the request. The role is whatever was embedded at
/// issuance; it is not re-read from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity<R> {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: R,
}

impl<R> Identity<R> {
    pub fn new(id: Uuid, name: impl Into<String>, email: impl Into<String>, role: R) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}
