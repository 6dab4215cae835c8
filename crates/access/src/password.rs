//! Article password verification.
//!
//! Passwords are stored as PHC strings (`$argon2id$v=19$...`). Verification
//! is a pure computation over the supplied plaintext and the stored hash, so
//! it can run inside the access engine without I/O.

use argon2::{Argon2, PasswordHasher, PasswordVerifier as _};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

/// Errors produced while hashing a new password.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// The operating system RNG could not produce a salt.
    #[error("failed to generate salt: {0}")]
    Salt(String),

    /// The hashing algorithm rejected its input.
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Checks a plaintext password against a stored hash.
///
/// Implementations must be total: a malformed hash verifies as `false`.
pub trait PasswordVerifier: Send + Sync {
    /// Returns true if `plain` matches `hash`.
    fn verify(&self, plain: &str, hash: &str) -> bool;
}

/// Argon2 verifier for PHC-format hashes.
///
/// Parameters are read from each hash, so hashes created with non-default
/// costs still verify.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordVerifier;

impl Argon2PasswordVerifier {
    /// Creates a verifier.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordVerifier for Argon2PasswordVerifier {
    fn verify(&self, plain: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored article password hash is not a valid PHC string");
                false
            }
        }
    }
}

/// Hashes a password into a PHC string with a random salt.
pub fn hash_password(plain: &str) -> Result<String, PasswordHashError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordHashError::Salt(e.to_string()))?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordHashError::Salt(e.to_string()))?;

    let phc = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| PasswordHashError::Hash(e.to_string()))?
        .to_string();

    Ok(phc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("abc123").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        let verifier = Argon2PasswordVerifier::new();
        assert!(verifier.verify("abc123", &hash));
        assert!(!verifier.verify("abc124", &hash));
        assert!(!verifier.verify("", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let verifier = Argon2PasswordVerifier::new();
        assert!(!verifier.verify("abc123", "abc123"));
        assert!(!verifier.verify("abc123", ""));
        assert!(!verifier.verify("abc123", "$argon2id$garbage"));
    }
}
