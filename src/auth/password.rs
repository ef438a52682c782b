//! Credential Hasher
//! Mission: Salted, adaptive one-way password hashing

use anyhow::{Context, Result};
use bcrypt::DEFAULT_COST;

/// Hash a plaintext password with a per-call random salt.
///
/// Uses bcrypt at `DEFAULT_COST` (12), above the minimum work factor of 10
/// required to resist offline brute force.
pub fn hash_password(plaintext: &str) -> Result<String> {
    bcrypt::hash(plaintext, DEFAULT_COST).context("Failed to hash password")
}

/// Verify a plaintext password against a stored digest.
///
/// Returns false on mismatch or on a malformed digest - a wrong password is
/// never an error.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}
