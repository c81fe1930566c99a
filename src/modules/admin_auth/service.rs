use autoescola_auth::{AdminRole, Identity, Role, TokenIssuer};
use autoescola_core::{AppError, equalize_timing, verify_password};
use autoescola_models::AdminLoginRequest;
use autoescola_observability::{track_login_failure, track_login_success};
use tracing::instrument;

use crate::store::AdminStore;

pub struct AdminAuthService;

impl AdminAuthService {
    /// Checks the credentials and signs a session for the admin.
    ///
    /// Unknown email, wrong password and deactivated account all produce the
    /// same `Credenciais inválidas` error after one bcrypt verification.
    #[instrument(skip(admins, issuer, dto), fields(email = %dto.email))]
    pub async fn login(
        admins: &dyn AdminStore,
        issuer: &TokenIssuer<AdminRole>,
        dto: AdminLoginRequest,
    ) -> Result<(Identity<AdminRole>, String), AppError> {
        let Some(account) = admins.find_admin_by_email(dto.email.trim()).await? else {
            equalize_timing(&dto.password);
            track_login_failure("admin");
            return Err(AppError::invalid_credentials());
        };

        let password_ok = verify_password(&dto.password, &account.password_hash)?;
        if !password_ok || !account.is_active {
            tracing::info!(admin_id = %account.id, active = account.is_active, "admin login rejected");
            track_login_failure("admin");
            return Err(AppError::invalid_credentials());
        }

        let identity = account.identity();
        let token = issuer.issue(&identity)?;

        tracing::info!(admin_id = %identity.id, role = %identity.role, "admin signed in");
        track_login_success("admin", identity.role.as_str());

        Ok((identity, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, test_session_config};
    use axum::http::StatusCode;

    fn request(email: &str, password: &str) -> AdminLoginRequest {
        AdminLoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_session() {
        let store = MemoryStore::new();
        let account = store.insert_admin("Admin Local", "admin@local.dev", "admin123", AdminRole::Admin);
        let issuer = TokenIssuer::admin_sessions(&test_session_config());

        let (identity, token) =
            AdminAuthService::login(store.as_ref(), &issuer, request("ADMIN@local.dev", "admin123"))
                .await
                .unwrap();

        assert_eq!(identity.id, account.id);
        assert_eq!(issuer.verify(&token).unwrap(), identity);
    }

    #[tokio::test]
    async fn test_inactive_admin_cannot_sign_in() {
        let store = MemoryStore::new();
        let account = store.insert_admin("Ex Admin", "ex@local.dev", "admin123", AdminRole::Operator);
        store.deactivate_admin(account.id);
        let issuer = TokenIssuer::admin_sessions(&test_session_config());

        let err = AdminAuthService::login(store.as_ref(), &issuer, request("ex@local.dev", "admin123"))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.public_message(), "Credenciais inválidas");
    }
}
