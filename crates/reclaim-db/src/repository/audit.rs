//! SurrealDB implementation of [`AuditRepository`].
//!
//! Timeline and document appends use SurrealDB's `+=` array operator so
//! each push is a single per-record statement. Concurrent appends on
//! one audit serialize without lost updates, and timestamps for
//! timeline entries are assigned server-side.

use chrono::{DateTime, Utc};
use reclaim_core::error::{ReclaimError, ReclaimResult};
use reclaim_core::models::audit::{
    Audit, AuditStatus, CreateAudit, DocumentMeta, ServiceType, TimelineEvent, TransitionRecord,
    UpdateAudit,
};
use reclaim_core::repository::{AuditRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct DocumentRow {
    filename: String,
    original_name: String,
    path: String,
    size: u64,
    mime_type: String,
    uploaded_at: DateTime<Utc>,
}

impl From<DocumentRow> for DocumentMeta {
    fn from(row: DocumentRow) -> Self {
        Self {
            filename: row.filename,
            original_name: row.original_name,
            path: row.path,
            size: row.size,
            mime_type: row.mime_type,
            uploaded_at: row.uploaded_at,
        }
    }
}

#[derive(Debug, SurrealValue)]
struct TimelineRow {
    event: String,
    description: String,
    timestamp: DateTime<Utc>,
    automated: bool,
}

impl From<TimelineRow> for TimelineEvent {
    fn from(row: TimelineRow) -> Self {
        Self {
            event: row.event,
            description: row.description,
            timestamp: row.timestamp,
            automated: row.automated,
        }
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct AuditRow {
    user_id: String,
    service_type: String,
    service_name: String,
    price: f64,
    status: String,
    documents: Vec<DocumentRow>,
    recovery_amount: f64,
    timeline: Vec<TimelineRow>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct AuditRowWithId {
    record_id: String,
    user_id: String,
    service_type: String,
    service_name: String,
    price: f64,
    status: String,
    documents: Vec<DocumentRow>,
    recovery_amount: f64,
    timeline: Vec<TimelineRow>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_service_type(s: &str) -> Result<ServiceType, DbError> {
    ServiceType::parse(s).ok_or_else(|| DbError::Data(format!("unknown service type: {s}")))
}

fn parse_status(s: &str) -> Result<AuditStatus, DbError> {
    AuditStatus::parse(s).ok_or_else(|| DbError::Data(format!("unknown audit status: {s}")))
}

impl AuditRow {
    fn into_audit(self, id: Uuid) -> Result<Audit, DbError> {
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Data(format!("invalid owner UUID: {e}")))?;
        Ok(Audit {
            id,
            user_id,
            service_type: parse_service_type(&self.service_type)?,
            service_name: self.service_name,
            price: self.price,
            status: parse_status(&self.status)?,
            documents: self.documents.into_iter().map(Into::into).collect(),
            recovery_amount: self.recovery_amount,
            timeline: self.timeline.into_iter().map(Into::into).collect(),
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl AuditRowWithId {
    fn try_into_audit(self) -> Result<Audit, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Data(format!("invalid UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Data(format!("invalid owner UUID: {e}")))?;
        Ok(Audit {
            id,
            user_id,
            service_type: parse_service_type(&self.service_type)?,
            service_name: self.service_name,
            price: self.price,
            status: parse_status(&self.status)?,
            documents: self.documents.into_iter().map(Into::into).collect(),
            recovery_amount: self.recovery_amount,
            timeline: self.timeline.into_iter().map(Into::into).collect(),
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Audit repository.
#[derive(Clone)]
pub struct SurrealAuditRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAuditRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AuditRepository for SurrealAuditRepository<C> {
    async fn create(&self, input: CreateAudit) -> ReclaimResult<Audit> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        // The opening timeline entry is embedded in the CREATE so a new
        // audit is born with exactly one entry in a single write.
        let result = self
            .db
            .query(
                "CREATE type::record('audit', $id) SET \
                 user_id = $user_id, \
                 service_type = $service_type, \
                 service_name = $service_name, \
                 price = $price, \
                 status = 'pending', \
                 documents = [], \
                 recovery_amount = 0.0, \
                 timeline = [{ \
                     event: 'audit_created', \
                     description: 'Audit request submitted', \
                     timestamp: time::now(), \
                     automated: true \
                 }], \
                 completed_at = NONE",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("service_type", input.service_type.as_str().to_string()))
            .bind(("service_name", input.service_name))
            .bind(("price", input.price))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Data(e.to_string()))?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "audit".into(),
            id: id_str,
        })?;

        Ok(row.into_audit(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> ReclaimResult<Audit> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('audit', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "audit".into(),
            id: id_str,
        })?;

        Ok(row.into_audit(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateAudit) -> ReclaimResult<Audit> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.recovery_amount.is_some() {
            sets.push("recovery_amount = $recovery_amount");
        }
        if input.completed_at.is_some() {
            sets.push("completed_at = $completed_at");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('audit', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(status) = input.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(recovery_amount) = input.recovery_amount {
            builder = builder.bind(("recovery_amount", recovery_amount));
        }
        if let Some(completed_at) = input.completed_at {
            builder = builder.bind(("completed_at", completed_at));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Data(e.to_string()))?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "audit".into(),
            id: id_str,
        })?;

        Ok(row.into_audit(id)?)
    }

    async fn apply_transition(&self, id: Uuid, record: TransitionRecord) -> ReclaimResult<Audit> {
        let id_str = id.to_string();
        let to = record.to;

        // Status, optional completion fields, and the timeline entry go
        // in one statement so a transition never half-applies. The
        // WHERE guard makes a concurrent move lose instead of being
        // silently overwritten.
        let mut sets = vec![
            "status = $to",
            "timeline += { \
                 event: 'status_changed', \
                 description: $description, \
                 timestamp: time::now(), \
                 automated: $automated \
             }",
        ];
        if record.recovery_amount.is_some() {
            sets.push("recovery_amount = $recovery_amount");
        }
        if record.completed_at.is_some() {
            sets.push("completed_at = $completed_at");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('audit', $id) SET {} WHERE status = $from",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("from", record.from.as_str().to_string()))
            .bind(("to", to.as_str().to_string()))
            .bind(("description", record.description))
            .bind(("automated", record.automated));

        if let Some(recovery_amount) = record.recovery_amount {
            builder = builder.bind(("recovery_amount", recovery_amount));
        }
        if let Some(completed_at) = record.completed_at {
            builder = builder.bind(("completed_at", completed_at));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Data(e.to_string()))?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(row.into_audit(id)?),
            None => {
                // The guard did not match: the record is gone or its
                // status moved between the read and this write.
                let current = self.get_by_id(id).await?;
                Err(ReclaimError::InvalidTransition {
                    from: current.status.as_str().into(),
                    to: to.as_str().into(),
                })
            }
        }
    }

    async fn append_timeline_event(
        &self,
        id: Uuid,
        event: &str,
        description: &str,
        automated: bool,
    ) -> ReclaimResult<Audit> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('audit', $id) SET \
                 timeline += { \
                     event: $event, \
                     description: $description, \
                     timestamp: time::now(), \
                     automated: $automated \
                 }, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("event", event.to_string()))
            .bind(("description", description.to_string()))
            .bind(("automated", automated))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "audit".into(),
            id: id_str,
        })?;

        Ok(row.into_audit(id)?)
    }

    async fn attach_document(&self, id: Uuid, document: DocumentMeta) -> ReclaimResult<Audit> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('audit', $id) SET \
                 documents += { \
                     filename: $filename, \
                     original_name: $original_name, \
                     path: $path, \
                     size: $size, \
                     mime_type: $mime_type, \
                     uploaded_at: $uploaded_at \
                 }, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("filename", document.filename))
            .bind(("original_name", document.original_name))
            .bind(("path", document.path))
            .bind(("size", document.size))
            .bind(("mime_type", document.mime_type))
            .bind(("uploaded_at", document.uploaded_at))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "audit".into(),
            id: id_str,
        })?;

        Ok(row.into_audit(id)?)
    }

    async fn list_by_owner(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> ReclaimResult<PaginatedResult<Audit>> {
        let user_id_str = user_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM audit \
                 WHERE user_id = $user_id GROUP ALL",
            )
            .bind(("user_id", user_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM audit \
                 WHERE user_id = $user_id \
                 ORDER BY created_at DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("user_id", user_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AuditRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_audit())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_by_status(
        &self,
        status: AuditStatus,
        pagination: Pagination,
    ) -> ReclaimResult<PaginatedResult<Audit>> {
        let status_str = status.as_str().to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM audit \
                 WHERE status = $status GROUP ALL",
            )
            .bind(("status", status_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM audit \
                 WHERE status = $status \
                 ORDER BY created_at DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("status", status_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AuditRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_audit())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
