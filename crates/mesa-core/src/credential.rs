//! # Credential Hashing
//!
//! Salted one-way hashes for employee passwords.
//!
//! Hashes are Argon2id in PHC string format (`$argon2id$v=19$...`), so the
//! salt and parameters travel with the hash in a single column. A plaintext
//! password is never stored and cannot be recovered from the hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{CoreError, CoreResult};

/// Hashes a plaintext password with a freshly generated salt.
///
/// Hashing the same password twice yields different strings.
pub fn hash_password(plaintext: &str) -> CoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| CoreError::CredentialHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks a plaintext guess against a stored hash.
///
/// A malformed stored hash never matches.
pub fn verify_password(guess: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(guess.as_bytes(), &parsed_hash)
        .is_ok()
}
