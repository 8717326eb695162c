//! Credential hashing for user accounts
//!
//! Hashing is an explicit step on the registration and credential-update
//! paths, not a side effect hidden inside the storage layer, so it can be
//! exercised on its own.

use crate::{Result, TandemError};

/// Hash a plaintext password with bcrypt
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| TandemError::Internal(format!("failed to hash password: {}", e)))
}

/// Verify a plaintext password against a stored bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| TandemError::Internal(format!("failed to verify password: {}", e)))
}
