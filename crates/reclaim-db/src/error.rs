//! Database-specific error types and conversions.

use reclaim_core::error::ReclaimError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Password hashing error: {0}")]
    Crypto(String),

    #[error("Malformed row data: {0}")]
    Data(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },
}

impl From<DbError> for ReclaimError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ReclaimError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => ReclaimError::AlreadyExists { entity },
            DbError::Crypto(msg) => ReclaimError::Crypto(msg),
            other => ReclaimError::Database(other.to_string()),
        }
    }
}
