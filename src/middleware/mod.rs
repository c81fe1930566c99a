//! Request gatekeeping.
//!
//! # Modules
//!
//! - [`routes`]: the route policy tables of both surfaces
//! - [`gatekeeper`]: middleware that verifies the caller's token and applies
//!   the route policy before any handler runs
//! - [`auth`]: token extraction and the identity extractors used by handlers
//!
//! # Flow
//!
//! 1. The gatekeeper resolves the policy for the request path
//! 2. If the route depends on the caller, the token is read from the
//!    `admin-session` cookie (admin surfaces) or the `Authorization: Bearer`
//!    header (backend API) and verified
//! 3. The request is admitted, redirected or rejected
//! 4. Admitted identities are stored in the request extensions, where the
//!    [`auth::AdminSession`] and [`auth::ApiUser`] extractors pick them up
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AdminSession;
//!
//! async fn me(AdminSession(admin): AdminSession) -> Json<AdminView> {
//!     Json(admin.into())
//! }
//! ```

pub mod auth;
pub mod gatekeeper;
pub mod routes;
