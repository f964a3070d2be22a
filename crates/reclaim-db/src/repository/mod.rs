//! SurrealDB repository implementations.

mod audit;
mod user;

pub use audit::SurrealAuditRepository;
pub use user::{SurrealUserRepository, verify_password};
