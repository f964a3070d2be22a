//! Reclaim Auth — password verification, JWT issuance/validation, the
//! access gate, and registration/login orchestration.

pub mod config;
pub mod error;
pub mod gate;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use gate::AccessGate;
pub use service::{AuthOutput, AuthService, RegisterInput};
pub use token::AccessTokenClaims;
