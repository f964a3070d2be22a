//! Domain models for Reclaim.
//!
//! These are the core types shared across all crates. Enum wire strings
//! match the stored document format exactly.

pub mod audit;
pub mod service;
pub mod user;
