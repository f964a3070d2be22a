//! Reclaim Server — HTTP API over the audit platform: registration and
//! login, the service catalog, audit CRUD, lifecycle transitions, and
//! document metadata uploads.

pub mod config;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use state::AppState;
