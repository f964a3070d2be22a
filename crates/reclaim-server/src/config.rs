//! Server configuration loaded from environment variables.

use std::env;

use reclaim_auth::AuthConfig;
use reclaim_db::DbConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Parse an optional env value, falling back to `default` only when the
/// variable is absent. A present-but-malformed value is a hard error;
/// silently ignoring it would run the server with a setting the
/// operator never chose.
fn parse_or_default<T: std::str::FromStr>(
    name: &str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("{name}: {raw:?}"))),
        None => Ok(default),
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Bind address (0.0.0.0 for LAN, 127.0.0.1 for localhost).
    pub bind_addr: String,
    /// SurrealDB WebSocket URL.
    pub db_url: String,
    /// SurrealDB namespace.
    pub db_namespace: String,
    /// SurrealDB database name.
    pub db_database: String,
    /// SurrealDB root username.
    pub db_username: String,
    /// SurrealDB root password.
    pub db_password: String,
    /// PEM-encoded Ed25519 private key for JWT signing.
    pub jwt_private_key_pem: String,
    /// PEM-encoded Ed25519 public key for JWT verification.
    pub jwt_public_key_pem: String,
    /// JWT issuer.
    pub jwt_issuer: String,
    /// Access token lifetime in seconds.
    pub token_lifetime_seconds: u64,
    /// Optional server-side pepper for password hashing.
    pub password_pepper: Option<String>,
    /// Minimum accepted password length.
    pub min_password_length: usize,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// CORS allowed origins (comma-separated in env var).
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// The JWT key pair is required; everything else has a sensible
    /// default for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let jwt_private_key_pem = env::var("JWT_PRIVATE_KEY_PEM")
            .map_err(|_| ConfigError::MissingEnvVar("JWT_PRIVATE_KEY_PEM".to_string()))?;
        let jwt_public_key_pem = env::var("JWT_PUBLIC_KEY_PEM")
            .map_err(|_| ConfigError::MissingEnvVar("JWT_PUBLIC_KEY_PEM".to_string()))?;

        Ok(Self {
            port: parse_or_default("RECLAIM_PORT", env::var("RECLAIM_PORT").ok(), 8080)?,
            bind_addr: env::var("RECLAIM_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            db_url: env::var("SURREAL_URL").unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            db_namespace: env::var("SURREAL_NAMESPACE").unwrap_or_else(|_| "reclaim".to_string()),
            db_database: env::var("SURREAL_DATABASE").unwrap_or_else(|_| "main".to_string()),
            db_username: env::var("SURREAL_USERNAME").unwrap_or_else(|_| "root".to_string()),
            db_password: env::var("SURREAL_PASSWORD").unwrap_or_else(|_| "root".to_string()),
            jwt_private_key_pem,
            jwt_public_key_pem,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "reclaim".to_string()),
            token_lifetime_seconds: parse_or_default(
                "TOKEN_LIFETIME_SECONDS",
                env::var("TOKEN_LIFETIME_SECONDS").ok(),
                86_400,
            )?,
            password_pepper: env::var("PASSWORD_PEPPER").ok(),
            min_password_length: parse_or_default(
                "MIN_PASSWORD_LENGTH",
                env::var("MIN_PASSWORD_LENGTH").ok(),
                6,
            )?,
            max_body_size: parse_or_default(
                "MAX_BODY_SIZE",
                env::var("MAX_BODY_SIZE").ok(),
                10 * 1024 * 1024, // 10 MiB
            )?,
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_database.clone(),
            username: self.db_username.clone(),
            password: self.db_password.clone(),
        }
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            jwt_private_key_pem: self.jwt_private_key_pem.clone(),
            jwt_public_key_pem: self.jwt_public_key_pem.clone(),
            access_token_lifetime_secs: self.token_lifetime_seconds,
            jwt_issuer: self.jwt_issuer.clone(),
            pepper: self.password_pepper.clone(),
            min_password_length: self.min_password_length,
        }
    }
}
