//! HTTP request handlers.

mod audits;
mod auth;
mod health;

pub use audits::{
    add_document, create_audit, get_audit, list_services, my_audits, update_status,
};
pub use auth::{login, register};
pub use health::health_check;
