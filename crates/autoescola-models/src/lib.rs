//! # Autoescola Models
//!
//! Domain models and DTOs for the Autoescola API.
//!
//! # Modules
//!
//! - [`admin`]: admin panel login, session probe and admin accounts
//! - [`auth`]: backend API login and user accounts
//! - [`audit`]: audit actions and entries
//! - [`instructors`]: instructor verification status and transitions
//! - [`plans`]: subscription plans
//!
//! # Example
//!
//! ```ignore
//! use autoescola_models::audit::AuditAction;
//! use autoescola_models::instructors::InstructorAction;
//!
//! let action = InstructorAction::Block.audit_action();
//! assert_eq!(action, AuditAction::InstructorBlocked);
//! ```

pub mod admin;
pub mod audit;
pub mod auth;
pub mod instructors;
pub mod plans;

// Re-export commonly used types at crate root for convenience
pub use admin::{AdminAccount, AdminLoginRequest, AdminSessionResponse, AdminView, LogoutResponse};
pub use audit::{AuditAction, AuditEntry, NewAuditEntry, UnknownAuditAction};
pub use auth::{LoginRequest, LoginResponse, UserAccount, UserView};
pub use instructors::{
    Instructor, InstructorAction, InstructorResponse, InstructorStatus, StatusChangeRequest,
    UnknownInstructorStatus,
};
pub use plans::{CreatePlanDto, Plan, PlanResponse, UpdatePlanDto};
