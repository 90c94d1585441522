//! Password hashing for applicant and admin accounts.
//!
//! Hashes are stored as Argon2id PHC strings, so the salt and cost
//! parameters travel with the hash in `usuarios.password_hash`.

use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
}

/// Check `password` against a stored hash.
///
/// A mismatch is `Ok(false)`; only an unreadable stored hash is an error.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, HashError> {
    let phc = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &phc) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

/// Hash with the same parameters as real accounts, used when there is no
/// account to check against.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("admisiones-dummy-password").ok());

/// Spend the same Argon2 work as [`verify_password`] when the email is
/// unknown, so response time does not reveal which emails are registered.
/// Always reports a mismatch.
pub fn verify_dummy_password(password: &str) -> bool {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, dummy);
    }
    false
}
