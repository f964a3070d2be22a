//! Access gate — the boundary component validating bearer tokens
//! before granting access to protected operations.

use reclaim_core::error::{ReclaimError, ReclaimResult};
use reclaim_core::models::user::User;
use reclaim_core::repository::UserRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token;

/// Generic over the user repository so the gate has no dependency on
/// the database crate.
pub struct AccessGate<U: UserRepository> {
    users: U,
    config: AuthConfig,
}

impl<U: UserRepository> AccessGate<U> {
    pub fn new(users: U, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Authorize a request from its `Authorization` header value.
    ///
    /// Verifies signature, expiry, and issuer, then resolves the
    /// subject against the credential store. Absent token, invalid or
    /// expired token, malformed subject, and unknown identity all fail
    /// with an authentication error — never a generic server error.
    /// No side effects: `last_login` is untouched.
    pub async fn authorize(&self, authorization: Option<&str>) -> ReclaimResult<User> {
        let raw = authorization
            .ok_or_else(|| AuthError::TokenInvalid("no token provided".into()))?
            .trim();
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw);
        if token.is_empty() {
            return Err(AuthError::TokenInvalid("no token provided".into()).into());
        }

        let claims = token::validate_access_token(token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.0.sub)
            .map_err(|_| AuthError::TokenInvalid("malformed subject".into()))?;

        let user = self
            .users
            .get_by_id(user_id)
            .await
            .map_err(|e| match e {
                ReclaimError::NotFound { .. } => {
                    AuthError::TokenInvalid("unknown identity".into()).into()
                }
                other => other,
            })?;

        Ok(user)
    }
}
