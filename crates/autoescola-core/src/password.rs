use std::sync::LazyLock;

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hash with no matching password, verified against when an account lookup misses
/// so unknown emails cost the same bcrypt round as wrong passwords.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash("autoescola::no-such-account", DEFAULT_COST).ok());

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

/// Computes the dummy hash now instead of on the first unknown-email login.
///
/// Returns `false` when bcrypt could not produce it, in which case
/// [`equalize_timing`] is a no-op.
pub fn warm_up_password_hashing() -> bool {
    LazyLock::force(&DUMMY_HASH).is_some()
}

pub fn equalize_timing(password: &str) {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(password, dummy);
    }
}
