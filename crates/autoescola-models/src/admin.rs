//! Admin panel authentication models.

use autoescola_auth::{AdminRole, Identity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AdminLoginRequest {
    #[validate(email(message = "E-mail inválido"))]
    #[schema(example = "admin@local.dev")]
    pub email: String,
    #[validate(length(min = 1, message = "Senha obrigatória"))]
    #[schema(example = "admin123")]
    pub password: String,
}

/// Admin as shown to the panel. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
}

impl From<Identity<AdminRole>> for AdminView {
    fn from(identity: Identity<AdminRole>) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            role: identity.role,
        }
    }
}

/// Body of a successful admin login and of the session probe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminSessionResponse {
    pub admin: AdminView,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Stored admin account.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub is_active: bool,
}

impl AdminAccount {
    pub fn identity(&self) -> Identity<AdminRole> {
        Identity::new(self.id, self.name.clone(), self.email.clone(), self.role)
    }
}
