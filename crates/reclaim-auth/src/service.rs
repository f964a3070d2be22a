//! Authentication service — registration and login orchestration.

use reclaim_core::error::{ReclaimError, ReclaimResult};
use reclaim_core::models::user::{CreateUser, ServiceArea, User, UserStatus};
use reclaim_core::repository::UserRepository;
use reclaim_core::validate;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub area: Option<ServiceArea>,
}

/// Successful login result.
#[derive(Debug)]
pub struct AuthOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// The authenticated user (secret never serialized).
    pub user: User,
}

/// Authentication service.
///
/// Generic over the repository implementation so the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    users: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: U, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Register a new account.
    ///
    /// Validates every field, normalizes the email to lowercase, and
    /// rejects an already-registered email (case-insensitive) with a
    /// field-level validation error. The store hashes the password and
    /// discards the plaintext; it is never logged.
    pub async fn register(&self, input: RegisterInput) -> ReclaimResult<User> {
        validate::validate_name(&input.name)?;
        validate::validate_email(&input.email)?;
        validate::validate_phone(&input.phone)?;
        validate::validate_password(&input.password, self.config.min_password_length)?;

        let email = validate::normalize_email(&input.email);

        // Pre-check for a friendlier error; the unique index remains as
        // the backstop against races.
        match self.users.get_by_email(&email).await {
            Ok(_) => {
                return Err(ReclaimError::validation("email", "Email is already registered"));
            }
            Err(ReclaimError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        self.users
            .create(CreateUser {
                name: input.name.trim().to_string(),
                email,
                phone: input.phone.trim().to_string(),
                password: input.password,
                area: input.area,
            })
            .await
    }

    /// Authenticate with email + password and issue an access token.
    ///
    /// Unknown email and wrong password both fail with the same
    /// low-detail error. `last_login` is stamped only on success.
    pub async fn authenticate(&self, email: &str, password: &str) -> ReclaimResult<AuthOutput> {
        let email = validate::normalize_email(email);

        let user = match self.users.get_by_email(&email).await {
            Ok(u) => u,
            Err(ReclaimError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )
        .map_err(|e| ReclaimError::Crypto(e.to_string()))?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        match user.status {
            UserStatus::Active => {}
            UserStatus::Suspended => return Err(AuthError::AccountSuspended.into()),
            UserStatus::Pending => return Err(AuthError::AccountPending.into()),
        }

        self.users.record_login(user.id).await?;

        let access_token = token::issue_access_token(user.id, user.role, &self.config)?;

        Ok(AuthOutput {
            access_token,
            expires_in: self.config.access_token_lifetime_secs,
            user,
        })
    }

    /// Change a user's password. The store rehashes with a fresh salt.
    pub async fn change_password(&self, user_id: uuid::Uuid, new_password: &str) -> ReclaimResult<()> {
        validate::validate_password(new_password, self.config.min_password_length)?;
        self.users.set_password(user_id, new_password).await
    }
}
