//! Integration tests for the Audit repository using in-memory SurrealDB.

use chrono::Utc;
use reclaim_core::error::ReclaimError;
use reclaim_core::models::audit::{
    AuditStatus, CreateAudit, DocumentMeta, ServiceType, TransitionRecord, UpdateAudit,
};
use reclaim_core::repository::{AuditRepository, Pagination};
use reclaim_db::repository::SurrealAuditRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    reclaim_db::run_migrations(&db).await.unwrap();
    db
}

fn sample_input(user_id: Uuid) -> CreateAudit {
    CreateAudit {
        user_id,
        service_type: ServiceType::AiValidation,
        service_name: "AI-Powered Bill Validation".into(),
        price: 299.99,
    }
}

#[tokio::test]
async fn create_audit_starts_pending_with_one_timeline_entry() {
    let db = setup().await;
    let repo = SurrealAuditRepository::new(db);
    let owner = Uuid::new_v4();

    let audit = repo.create(sample_input(owner)).await.unwrap();

    assert_eq!(audit.user_id, owner);
    assert_eq!(audit.service_type, ServiceType::AiValidation);
    assert_eq!(audit.status, AuditStatus::Pending);
    assert_eq!(audit.recovery_amount, 0.0);
    assert!(audit.documents.is_empty());
    assert!(audit.completed_at.is_none());

    assert_eq!(audit.timeline.len(), 1);
    let opening = &audit.timeline[0];
    assert_eq!(opening.event, "audit_created");
    assert_eq!(opening.description, "Audit request submitted");
    assert!(opening.automated);
}

#[tokio::test]
async fn get_by_id_round_trips() {
    let db = setup().await;
    let repo = SurrealAuditRepository::new(db);

    let audit = repo.create(sample_input(Uuid::new_v4())).await.unwrap();
    let fetched = repo.get_by_id(audit.id).await.unwrap();

    assert_eq!(fetched.id, audit.id);
    assert_eq!(fetched.service_name, audit.service_name);
    assert_eq!(fetched.timeline.len(), 1);
}

#[tokio::test]
async fn get_unknown_audit_is_not_found() {
    let db = setup().await;
    let repo = SurrealAuditRepository::new(db);

    let result = repo.get_by_id(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ReclaimError::NotFound { .. })));
}

#[tokio::test]
async fn update_sets_status_and_recovery() {
    let db = setup().await;
    let repo = SurrealAuditRepository::new(db);

    let audit = repo.create(sample_input(Uuid::new_v4())).await.unwrap();

    let updated = repo
        .update(
            audit.id,
            UpdateAudit {
                status: Some(AuditStatus::Processing),
                recovery_amount: Some(1200.50),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, AuditStatus::Processing);
    assert_eq!(updated.recovery_amount, 1200.50);
    // Untouched fields survive a partial update.
    assert_eq!(updated.price, 299.99);
    assert_eq!(updated.timeline.len(), 1);
}

#[tokio::test]
async fn apply_transition_writes_status_and_timeline_together() {
    let db = setup().await;
    let repo = SurrealAuditRepository::new(db);

    let audit = repo.create(sample_input(Uuid::new_v4())).await.unwrap();

    let after = repo
        .apply_transition(
            audit.id,
            TransitionRecord {
                from: AuditStatus::Pending,
                to: AuditStatus::Completed,
                description: "Findings confirmed".into(),
                automated: false,
                recovery_amount: Some(4247.0),
                completed_at: Some(Utc::now()),
            },
        )
        .await
        .unwrap();

    // One write produced the status, the completion fields, and the
    // timeline entry.
    assert_eq!(after.status, AuditStatus::Completed);
    assert_eq!(after.recovery_amount, 4247.0);
    assert!(after.completed_at.is_some());
    assert_eq!(after.timeline.len(), 2);
    assert_eq!(after.timeline[1].event, "status_changed");
    assert_eq!(after.timeline[1].description, "Findings confirmed");
}

#[tokio::test]
async fn apply_transition_with_stale_status_leaves_record_unchanged() {
    let db = setup().await;
    let repo = SurrealAuditRepository::new(db);

    let audit = repo.create(sample_input(Uuid::new_v4())).await.unwrap();

    repo.apply_transition(
        audit.id,
        TransitionRecord {
            from: AuditStatus::Pending,
            to: AuditStatus::Processing,
            description: "Intake complete".into(),
            automated: true,
            recovery_amount: None,
            completed_at: None,
        },
    )
    .await
    .unwrap();

    // A second writer that decided against the old `pending` status
    // must lose rather than overwrite.
    let stale = repo
        .apply_transition(
            audit.id,
            TransitionRecord {
                from: AuditStatus::Pending,
                to: AuditStatus::Disputed,
                description: "Customer disputed".into(),
                automated: false,
                recovery_amount: None,
                completed_at: None,
            },
        )
        .await;
    match stale {
        Err(ReclaimError::InvalidTransition { from, to }) => {
            assert_eq!(from, "processing");
            assert_eq!(to, "disputed");
        }
        other => panic!("expected InvalidTransition, got {other:?}"),
    }

    let unchanged = repo.get_by_id(audit.id).await.unwrap();
    assert_eq!(unchanged.status, AuditStatus::Processing);
    assert_eq!(unchanged.timeline.len(), 2);
    assert_eq!(unchanged.timeline[1].description, "Intake complete");
}

#[tokio::test]
async fn append_timeline_event_preserves_order() {
    let db = setup().await;
    let repo = SurrealAuditRepository::new(db);

    let audit = repo.create(sample_input(Uuid::new_v4())).await.unwrap();

    repo.append_timeline_event(audit.id, "status_changed", "Moved to processing", true)
        .await
        .unwrap();
    let after = repo
        .append_timeline_event(audit.id, "status_changed", "Moved to review", false)
        .await
        .unwrap();

    assert_eq!(after.timeline.len(), 3);
    assert_eq!(after.timeline[0].event, "audit_created");
    assert_eq!(after.timeline[1].description, "Moved to processing");
    assert_eq!(after.timeline[2].description, "Moved to review");
    assert!(!after.timeline[2].automated);
    // Store-assigned timestamps never go backwards.
    assert!(after.timeline[1].timestamp >= after.timeline[0].timestamp);
    assert!(after.timeline[2].timestamp >= after.timeline[1].timestamp);
}

#[tokio::test]
async fn attach_document_appends_metadata() {
    let db = setup().await;
    let repo = SurrealAuditRepository::new(db);

    let audit = repo.create(sample_input(Uuid::new_v4())).await.unwrap();

    let doc = DocumentMeta {
        filename: "1724630400-statement.pdf".into(),
        original_name: "statement.pdf".into(),
        path: "/uploads/1724630400-statement.pdf".into(),
        size: 48_123,
        mime_type: "application/pdf".into(),
        uploaded_at: Utc::now(),
    };

    let after = repo.attach_document(audit.id, doc.clone()).await.unwrap();

    assert_eq!(after.documents.len(), 1);
    assert_eq!(after.documents[0].filename, doc.filename);
    assert_eq!(after.documents[0].size, 48_123);
    assert_eq!(after.documents[0].mime_type, "application/pdf");
}

#[tokio::test]
async fn list_by_owner_filters_and_paginates() {
    let db = setup().await;
    let repo = SurrealAuditRepository::new(db);

    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();

    for _ in 0..4 {
        repo.create(sample_input(owner)).await.unwrap();
    }
    repo.create(sample_input(other)).await.unwrap();

    let page = repo
        .list_by_owner(
            owner,
            Pagination {
                offset: 0,
                limit: 3,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 4);
    assert_eq!(page.items.len(), 3);
    assert!(page.items.iter().all(|a| a.user_id == owner));

    let rest = repo
        .list_by_owner(
            owner,
            Pagination {
                offset: 3,
                limit: 3,
            },
        )
        .await
        .unwrap();
    assert_eq!(rest.items.len(), 1);
}

#[tokio::test]
async fn list_by_status_filters() {
    let db = setup().await;
    let repo = SurrealAuditRepository::new(db);

    let a = repo.create(sample_input(Uuid::new_v4())).await.unwrap();
    let b = repo.create(sample_input(Uuid::new_v4())).await.unwrap();
    repo.create(sample_input(Uuid::new_v4())).await.unwrap();

    for id in [a.id, b.id] {
        repo.update(
            id,
            UpdateAudit {
                status: Some(AuditStatus::UnderReview),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let under_review = repo
        .list_by_status(AuditStatus::UnderReview, Pagination::default())
        .await
        .unwrap();
    assert_eq!(under_review.total, 2);
    assert!(
        under_review
            .items
            .iter()
            .all(|a| a.status == AuditStatus::UnderReview)
    );

    let pending = repo
        .list_by_status(AuditStatus::Pending, Pagination::default())
        .await
        .unwrap();
    assert_eq!(pending.total, 1);
}
