//! Backend API authentication models.

use autoescola_auth::{AppRole, Identity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "E-mail inválido"))]
    #[schema(example = "instrutor@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Senha obrigatória"))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: AppRole,
}

impl From<Identity<AppRole>> for UserView {
    fn from(identity: Identity<AppRole>) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            role: identity.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserView,
}

/// Stored backend user account.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: AppRole,
}

impl UserAccount {
    pub fn identity(&self) -> Identity<AppRole> {
        Identity::new(self.id, self.name.clone(), self.email.clone(), self.role)
    }
}
