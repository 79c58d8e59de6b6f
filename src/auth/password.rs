//! Password Hashing
//! Argon2id hashing and one-way verification of stored PHC strings

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use tracing::warn;

lazy_static! {
    /// Hash compared against when the email is unknown, so a miss costs one
    /// verification like a hit does.
    static ref DUMMY_HASH: Option<String> = hash_password("bookmarks-dummy-password").ok();
}

/// Hash a plaintext password with a fresh random salt.
///
/// Returns the PHC string (`$argon2id$v=19$...`), which embeds algorithm,
/// parameters and salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash.
///
/// `Ok(false)` means the password does not match. An unparseable stored hash
/// is an error, not a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| anyhow!("Malformed password hash: {e}"))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("Failed to verify password: {e}")),
    }
}

/// Spend one verification on a throwaway hash.
pub fn burn_verification(password: &str) {
    match DUMMY_HASH.as_deref() {
        Some(hash) => {
            let _ = verify_password(password, hash);
        }
        None => warn!("Dummy password hash unavailable, unknown-email signin is not timing-padded"),
    }
}
