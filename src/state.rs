use std::fmt;
use std::sync::Arc;

use autoescola_auth::{AdminRole, AppRole, RoutePolicy, TokenIssuer};
use autoescola_config::{CorsConfig, JwtConfig, SessionConfig};
use autoescola_observability::PrometheusHandle;

use crate::middleware::routes::{admin_panel_policy, api_policy};
use crate::store::{AdminStore, InstructorStore, Store, UserStore, WriteStore};

/// Shared, read-only application state.
///
/// Built once at startup. Cloning is cheap: every field is an `Arc` or a small
/// config value.
#[derive(Clone)]
pub struct AppState {
    pub admin_sessions: Arc<TokenIssuer<AdminRole>>,
    pub api_tokens: Arc<TokenIssuer<AppRole>>,
    pub admin_routes: Arc<RoutePolicy<AdminRole>>,
    pub api_routes: Arc<RoutePolicy<AppRole>>,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
    pub admins: Arc<dyn AdminStore>,
    pub users: Arc<dyn UserStore>,
    pub instructors: Arc<dyn InstructorStore>,
    pub writes: Arc<dyn WriteStore>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new<S>(
        store: Arc<S>,
        session_config: SessionConfig,
        jwt_config: &JwtConfig,
        cors_config: CorsConfig,
    ) -> Self
    where
        S: Store + 'static,
    {
        Self {
            admin_sessions: Arc::new(TokenIssuer::admin_sessions(&session_config)),
            api_tokens: Arc::new(TokenIssuer::api_tokens(jwt_config)),
            admin_routes: Arc::new(admin_panel_policy()),
            api_routes: Arc::new(api_policy()),
            session_config,
            cors_config,
            admins: store.clone(),
            users: store.clone(),
            instructors: store.clone(),
            writes: store,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusHandle>) -> Self {
        self.metrics = metrics;
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("admin_sessions", &self.admin_sessions)
            .field("api_tokens", &self.api_tokens)
            .field("session_config", &self.session_config)
            .field("cors_config", &self.cors_config)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
