//! Argon2id password verification.
//!
//! Hashing lives with the user repository, which owns the parameter
//! choice; this module only checks a candidate password against a
//! stored PHC-format hash. The PHC string carries its own parameters,
//! so verification works regardless of the settings used at hash time.

use argon2::{Argon2, PasswordVerifier};

use crate::error::AuthError;

/// Check `password` against a stored Argon2id PHC hash.
///
/// When a `pepper` is configured it is prepended to the candidate, and
/// has to be the same pepper the hash was produced with.
///
/// A mismatch is `Ok(false)`; `Err(AuthError::Crypto)` is reserved for
/// a hash that cannot be parsed at all.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(input, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}
