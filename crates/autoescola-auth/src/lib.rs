//! # Autoescola Auth
//!
//! The authentication and authorization core shared in design by the two
//! Autoescola surfaces:
//!
//! - the **admin panel**, whose actors carry an [`AdminRole`] and present a
//!   signed session in an HTTP-only cookie;
//! - the **backend API**, whose actors carry an [`AppRole`] and present a
//!   bearer token.
//!
//! Both are served by the same [`TokenIssuer`] type, instantiated once per
//! universe with its own secret and audience, so a token from one universe is
//! never accepted by the other.
//!
//! - [`roles`]: the two role universes
//! - [`identity`]: the verified actor attached to a request
//! - [`claims`]: the signed token payload
//! - [`issuer`]: token issuance and verification
//! - [`policy`]: the declarative route policy table and role authorizer
//!
//! # Example
//!
//! ```ignore
//! use autoescola_auth::{AdminRole, Identity, TokenIssuer};
//!
//! let issuer = TokenIssuer::<AdminRole>::admin_sessions(&session_config);
//! let token = issuer.issue(&identity)?;
//! let verified = issuer.verify(&token)?;
//! assert_eq!(verified, identity);
//! ```

pub mod claims;
pub mod identity;
pub mod issuer;
pub mod policy;
pub mod roles;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use identity::Identity;
pub use issuer::{ADMIN_AUDIENCE, API_AUDIENCE, TokenError, TokenIssuer};
pub use policy::{Access, Decision, Gate, RoutePolicy, authorize};
pub use roles::{AdminRole, AppRole, Role, UnknownRole};
