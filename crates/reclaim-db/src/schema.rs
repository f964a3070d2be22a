//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as their wire strings
//! with ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD phone ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD area ON TABLE user TYPE string \
    ASSERT $value IN ['ai-validation', 'mortgage', 'medical', \
    'banking', 'automotive', 'employment', 'retirement', 'utilities', \
    'education', 'legal', 'business', 'comprehensive'];
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['user', 'partner', 'admin'];
DEFINE FIELD status ON TABLE user TYPE string \
    ASSERT $value IN ['active', 'pending', 'suspended'];
DEFINE FIELD badges ON TABLE user TYPE array DEFAULT [];
DEFINE FIELD badges.* ON TABLE user TYPE string;
DEFINE FIELD total_recovery ON TABLE user TYPE float DEFAULT 0.0;
DEFINE FIELD audits_completed ON TABLE user TYPE int DEFAULT 0;
DEFINE FIELD last_login ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Audits (timeline is append-only; pushes happen per-document)
-- =======================================================================
DEFINE TABLE audit SCHEMAFULL;
DEFINE FIELD user_id ON TABLE audit TYPE string;
DEFINE FIELD service_type ON TABLE audit TYPE string \
    ASSERT $value IN ['ai-validation', 'document-enforcement', \
    'calendar-automation', 'cfpb-automation', 'zadarma-crm', \
    'ucc-tracking', 'legal-violation', 'contract-flowchart', \
    'partner-referral', 'admin-vault', 'business-loan', \
    'medical-billing', 'mortgage-notes', 'auto-insurance', \
    '401k-audit', 'banking-fees', 'utilities-telecom', \
    'urla-processing', 'payroll-employment', 'student-loan', \
    'complete-suite'];
DEFINE FIELD service_name ON TABLE audit TYPE string;
DEFINE FIELD price ON TABLE audit TYPE float;
DEFINE FIELD status ON TABLE audit TYPE string \
    ASSERT $value IN ['pending', 'processing', 'ai-analysis', \
    'under-review', 'completed', 'disputed'];
DEFINE FIELD documents ON TABLE audit TYPE array DEFAULT [];
DEFINE FIELD documents.* ON TABLE audit TYPE object;
DEFINE FIELD documents.*.filename ON TABLE audit TYPE string;
DEFINE FIELD documents.*.original_name ON TABLE audit TYPE string;
DEFINE FIELD documents.*.path ON TABLE audit TYPE string;
DEFINE FIELD documents.*.size ON TABLE audit TYPE int;
DEFINE FIELD documents.*.mime_type ON TABLE audit TYPE string;
DEFINE FIELD documents.*.uploaded_at ON TABLE audit TYPE datetime;
DEFINE FIELD recovery_amount ON TABLE audit TYPE float DEFAULT 0.0;
DEFINE FIELD timeline ON TABLE audit TYPE array DEFAULT [];
DEFINE FIELD timeline.* ON TABLE audit TYPE object;
DEFINE FIELD timeline.*.event ON TABLE audit TYPE string;
DEFINE FIELD timeline.*.description ON TABLE audit TYPE string;
DEFINE FIELD timeline.*.timestamp ON TABLE audit TYPE datetime;
DEFINE FIELD timeline.*.automated ON TABLE audit TYPE bool;
DEFINE FIELD completed_at ON TABLE audit TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE audit TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE audit TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_audit_user ON TABLE audit COLUMNS user_id;
DEFINE INDEX idx_audit_status ON TABLE audit COLUMNS status;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}
