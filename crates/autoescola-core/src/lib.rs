//! # Autoescola Core
//!
//! Foundational types shared by every Autoescola crate:
//!
//! - [`errors`]: the [`AppError`] taxonomy and its HTTP rendering
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use autoescola_core::{AppError, verify_password};
//!
//! if !verify_password(&dto.password, &account.password_hash)? {
//!     return Err(AppError::invalid_credentials());
//! }
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use password::{
    equalize_timing, hash_password, hash_password_with_cost, verify_password,
    warm_up_password_hashing,
};
