//! Reclaim Core — domain models, input validation, repository traits,
//! and the audit lifecycle rules shared across all crates.

pub mod error;
pub mod lifecycle;
pub mod models;
pub mod repository;
pub mod validate;

pub use error::{ReclaimError, ReclaimResult};
pub use lifecycle::{LifecycleController, TransitionInput};
pub use repository::{AuditRepository, PaginatedResult, Pagination, UserRepository};
