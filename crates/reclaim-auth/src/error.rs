//! Authentication error types.

use reclaim_core::error::ReclaimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is suspended")]
    AccountSuspended,

    #[error("account is pending activation")]
    AccountPending,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for ReclaimError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::AccountSuspended
            | AuthError::AccountPending
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => ReclaimError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => ReclaimError::Crypto(msg),
        }
    }
}
