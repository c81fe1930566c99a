use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use autoescola_auth::{AdminRole, AppRole};
use autoescola_core::ErrorResponse;
use autoescola_models::{
    AdminLoginRequest, AdminSessionResponse, AdminView, AuditAction, AuditEntry, CreatePlanDto,
    Instructor, InstructorResponse, InstructorStatus, LoginRequest, LoginResponse, LogoutResponse,
    Plan, PlanResponse, StatusChangeRequest, UpdatePlanDto, UserView,
};

use crate::modules::panel::controller::PageResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::admin_auth::controller::admin_login,
        crate::modules::admin_auth::controller::admin_me,
        crate::modules::admin_auth::controller::admin_logout,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_profile,
        crate::modules::instructors::controller::approve_instructor,
        crate::modules::instructors::controller::reject_instructor,
        crate::modules::instructors::controller::block_instructor,
        crate::modules::instructors::controller::unblock_instructor,
        crate::modules::plans::controller::create_plan,
        crate::modules::plans::controller::update_plan,
        crate::modules::panel::controller::show_page,
    ),
    components(
        schemas(
            AdminRole,
            AppRole,
            AdminLoginRequest,
            AdminView,
            AdminSessionResponse,
            LogoutResponse,
            LoginRequest,
            LoginResponse,
            UserView,
            Instructor,
            InstructorStatus,
            InstructorResponse,
            StatusChangeRequest,
            Plan,
            PlanResponse,
            CreatePlanDto,
            UpdatePlanDto,
            AuditAction,
            AuditEntry,
            PageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Admin Session", description = "Admin panel sign-in backed by an HttpOnly cookie"),
        (name = "Admin Panel", description = "Admin panel pages behind the session gate"),
        (name = "Admin Instructors", description = "Instructor moderation, audited"),
        (name = "Admin Plans", description = "Subscription plan management, audited"),
        (name = "Authentication", description = "Backend API bearer token sign-in")
    ),
    info(
        title = "Autoescola API",
        version = "0.1.0",
        description = "Authentication, authorization and audit layer of the Autoescola instructor marketplace.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("admin-session"))),
            );
        }
    }
}
