use autoescola_auth::{AppRole, Role, TokenIssuer};
use autoescola_core::{AppError, equalize_timing, verify_password};
use autoescola_models::{LoginRequest, LoginResponse};
use autoescola_observability::{track_login_failure, track_login_success};
use tracing::instrument;

use crate::store::UserStore;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(users, issuer, dto), fields(email = %dto.email))]
    pub async fn login_user(
        users: &dyn UserStore,
        issuer: &TokenIssuer<AppRole>,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let Some(account) = users.find_user_by_email(dto.email.trim()).await? else {
            equalize_timing(&dto.password);
            track_login_failure("api");
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(&dto.password, &account.password_hash)? {
            track_login_failure("api");
            return Err(AppError::invalid_credentials());
        }

        let identity = account.identity();
        let access_token = issuer.issue(&identity)?;

        tracing::info!(user_id = %identity.id, role = %identity.role, "user signed in");
        track_login_success("api", identity.role.as_str());

        Ok(LoginResponse {
            access_token,
            user: identity.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, test_jwt_config};

    #[tokio::test]
    async fn test_login_returns_bearer_token() {
        let store = MemoryStore::new();
        store.insert_user("Bia", "bia@example.com", "password123", AppRole::Student);
        let issuer = TokenIssuer::api_tokens(&test_jwt_config());

        let response = AuthService::login_user(
            store.as_ref(),
            &issuer,
            LoginRequest {
                email: "bia@example.com".to_string(),
                password: "password123".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.user.role, AppRole::Student);
        let identity = issuer.verify(&response.access_token).unwrap();
        assert_eq!(identity.email, "bia@example.com");
    }
}
