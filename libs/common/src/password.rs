//! Password hashing with Argon2
//!
//! Hashes are stored in PHC string format, so the algorithm parameters and
//! the per-password salt travel with the hash itself.

use anyhow::{Result, anyhow};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use std::sync::OnceLock;

/// Hash a plaintext password with a freshly generated salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Check a plaintext password against a stored PHC hash
///
/// An unparsable stored hash is an error; a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow!("Failed to parse password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Run a full verification against a throwaway hash and report no match
///
/// Used when there is no usable account, so that a failed login costs the
/// same whether or not the username exists.
pub fn verify_dummy(password: &str) -> bool {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    if let Some(hash) = DUMMY_HASH.get_or_init(|| hash_password("unusable-dummy-password").ok()) {
        let _ = verify_password(password, hash);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext_and_verifies() {
        let hash = hash_password("abcdef").unwrap();

        assert_ne!(hash, "abcdef");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("abcdef", &hash).unwrap());
        assert!(!verify_password("abcdeg", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_foreign_hash_format_is_an_error() {
        assert!(verify_password("secret", "pbkdf2_sha256$600000$salt$hash").is_err());
    }

    #[test]
    fn test_dummy_verification_never_matches() {
        assert!(!verify_dummy("unusable-dummy-password"));
        assert!(!verify_dummy("abcdef"));
    }
}
