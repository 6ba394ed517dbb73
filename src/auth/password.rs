use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tokio::task::{self, JoinError};
use tracing::error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("argon2 hash failed: {0}")]
    Hashing(String),

    /// The stored hash could not be used. Never returned for a plain mismatch.
    #[error("argon2 verify failed: {0}")]
    Verification(String),

    #[error("password task aborted: {0}")]
    Task(#[from] JoinError),
}

/// Hashes with Argon2id and a fresh salt, returning the PHC string
/// (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`).
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            PasswordError::Hashing(e.to_string())
        })
}

/// Checks `plain` against a PHC string using the parameters embedded in it.
pub fn verify_password(hash: &str, plain: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        PasswordError::Verification(e.to_string())
    })?;

    // "$argon2id" parses, but without salt and output there is nothing to compare
    if parsed.salt.is_none() || parsed.hash.is_none() {
        error!("argon2 hash has no salt or output");
        return Err(PasswordError::Verification(
            "hash is missing its salt or output".into(),
        ));
    }

    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            error!(error = %e, "argon2 verify_password error");
            Err(PasswordError::Verification(e.to_string()))
        }
    }
}

/// [`hash_password`] on the blocking pool so the executor keeps serving other requests.
pub async fn hash_password_blocking(plain: String) -> Result<String, PasswordError> {
    task::spawn_blocking(move || hash_password(&plain)).await?
}

pub async fn verify_password_blocking(hash: String, plain: String) -> Result<bool, PasswordError> {
    task::spawn_blocking(move || verify_password(&hash, &plain)).await?
}
