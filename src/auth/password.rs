use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Check `plain` against a stored credential.
///
/// Stored values that parse as a PHC string are verified with Argon2. Anything
/// else is a legacy plaintext credential and only matches by equality when
/// `allow_plaintext` is set.
pub fn verify_password(plain: &str, stored: &str, allow_plaintext: bool) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) if allow_plaintext => {
            warn!("comparing against a plaintext stored password");
            plain == stored
        }
        Err(e) => {
            warn!(error = %e, "stored password is not an argon2 hash; plaintext disabled");
            false
        }
    }
}
