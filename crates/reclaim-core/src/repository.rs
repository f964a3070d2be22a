//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations are expected to
//! provide per-document atomicity for timeline and document appends so
//! concurrent appends on one audit serialize without lost updates.

use uuid::Uuid;

use crate::error::ReclaimResult;
use crate::models::{
    audit::{Audit, AuditStatus, CreateAudit, DocumentMeta, TransitionRecord, UpdateAudit},
    user::{CreateUser, UpdateUser, User},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait UserRepository: Send + Sync {
    /// Create a user. The raw password is hashed before storage and the
    /// plaintext discarded. Email is stored lowercase.
    fn create(&self, input: CreateUser) -> impl Future<Output = ReclaimResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = ReclaimResult<User>> + Send;
    /// Lookup is case-insensitive.
    fn get_by_email(&self, email: &str) -> impl Future<Output = ReclaimResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = ReclaimResult<User>> + Send;
    /// Rehash with a fresh salt and replace the stored secret.
    fn set_password(
        &self,
        id: Uuid,
        new_password: &str,
    ) -> impl Future<Output = ReclaimResult<()>> + Send;
    /// Stamp `last_login` with the current time. Called only on
    /// successful authentication.
    fn record_login(&self, id: Uuid) -> impl Future<Output = ReclaimResult<()>> + Send;
    /// Increment `total_recovery` by `recovery_amount` and
    /// `audits_completed` by one.
    fn record_completion(
        &self,
        id: Uuid,
        recovery_amount: f64,
    ) -> impl Future<Output = ReclaimResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = ReclaimResult<PaginatedResult<User>>> + Send;
}

pub trait AuditRepository: Send + Sync {
    /// Create an audit with status `pending`, zero recovery, and exactly
    /// one `audit_created` timeline entry, all in a single write.
    fn create(&self, input: CreateAudit) -> impl Future<Output = ReclaimResult<Audit>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = ReclaimResult<Audit>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateAudit,
    ) -> impl Future<Output = ReclaimResult<Audit>> + Send;
    /// Apply a status change and its timeline entry in a single
    /// per-document write, guarded on `record.from`: if the stored
    /// status no longer matches, nothing is written and the call fails
    /// with `InvalidTransition`.
    fn apply_transition(
        &self,
        id: Uuid,
        record: TransitionRecord,
    ) -> impl Future<Output = ReclaimResult<Audit>> + Send;
    /// Append one timeline entry atomically (per-document push). The
    /// store assigns the timestamp. This is the only sanctioned way
    /// timeline entries are added.
    fn append_timeline_event(
        &self,
        id: Uuid,
        event: &str,
        description: &str,
        automated: bool,
    ) -> impl Future<Output = ReclaimResult<Audit>> + Send;
    /// Append document metadata atomically.
    fn attach_document(
        &self,
        id: Uuid,
        document: DocumentMeta,
    ) -> impl Future<Output = ReclaimResult<Audit>> + Send;
    fn list_by_owner(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = ReclaimResult<PaginatedResult<Audit>>> + Send;
    fn list_by_status(
        &self,
        status: AuditStatus,
        pagination: Pagination,
    ) -> impl Future<Output = ReclaimResult<PaginatedResult<Audit>>> + Send;
}
