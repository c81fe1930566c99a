//! # Autoescola CLI
//!
//! Account provisioning for the admin panel.
//!
//! ## Usage
//!
//! ```ignore
//! use autoescola_auth::AdminRole;
//! use autoescola_cli::{NewAdmin, create_admin};
//!
//! let id = create_admin(&pool, &NewAdmin {
//!     name: "Admin Local".into(),
//!     email: "admin@local.dev".into(),
//!     password: "admin123".into(),
//!     role: AdminRole::Admin,
//! }).await?;
//! ```

use autoescola_auth::{AdminRole, Role};
use autoescola_core::hash_password;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum CreateAdminError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    WeakPassword,

    #[error("an admin with email {0} already exists")]
    DuplicateEmail(String),

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: AdminRole,
}

impl NewAdmin {
    /// Trims name and email and checks the basic shape of every field.
    pub fn normalized(self) -> Result<Self, CreateAdminError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(CreateAdminError::EmptyName);
        }

        let email = self.email.trim().to_lowercase();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(CreateAdminError::InvalidEmail(email));
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CreateAdminError::WeakPassword);
        }

        Ok(Self {
            name,
            email,
            password: self.password,
            role: self.role,
        })
    }
}

/// Inserts an admin account, returning its id.
pub async fn create_admin(pool: &PgPool, admin: NewAdmin) -> Result<Uuid, CreateAdminError> {
    let admin = admin.normalized()?;
    let password_hash =
        hash_password(&admin.password).map_err(|e| CreateAdminError::Hash(e.error.to_string()))?;

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO admins (name, email, password_hash, role)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT ((LOWER(email))) DO NOTHING
         RETURNING id",
    )
    .bind(&admin.name)
    .bind(&admin.email)
    .bind(&password_hash)
    .bind(admin.role.as_str())
    .fetch_optional(pool)
    .await?;

    id.ok_or(CreateAdminError::DuplicateEmail(admin.email))
}
