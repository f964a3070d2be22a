//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    reclaim_db::run_migrations(&db).await.unwrap();

    // Verify that the tables exist by querying INFO FOR DB.
    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("user"), "missing user table");
    assert!(info_str.contains("audit"), "missing audit table");

    // Verify migration was recorded.
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    // Run twice — should not fail.
    reclaim_db::run_migrations(&db).await.unwrap();
    reclaim_db::run_migrations(&db).await.unwrap();

    // Verify only one migration record exists.
    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one migration record");
}

#[tokio::test]
async fn status_assert_rejects_unknown_values() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    reclaim_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE audit SET \
             user_id = 'u', \
             service_type = 'ai-validation', \
             service_name = 'AI Validation', \
             price = 299.99, \
             status = 'archived', \
             documents = [], \
             recovery_amount = 0.0, \
             timeline = [], \
             completed_at = NONE",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "unknown status should be rejected");
}

#[tokio::test]
async fn unique_index_prevents_duplicate_emails() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    reclaim_db::run_migrations(&db).await.unwrap();

    db.query(
        "CREATE user SET \
         name = 'First', \
         email = 'same@example.com', \
         phone = '555-123-4567', \
         password_hash = 'x', \
         area = 'comprehensive', \
         role = 'user', \
         status = 'active', \
         badges = [], \
         total_recovery = 0.0, \
         audits_completed = 0",
    )
    .await
    .unwrap()
    .check()
    .unwrap();

    let result = db
        .query(
            "CREATE user SET \
             name = 'Second', \
             email = 'same@example.com', \
             phone = '555-765-4321', \
             password_hash = 'y', \
             area = 'comprehensive', \
             role = 'user', \
             status = 'active', \
             badges = [], \
             total_recovery = 0.0, \
             audits_completed = 0",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "duplicate email should be rejected");
}
