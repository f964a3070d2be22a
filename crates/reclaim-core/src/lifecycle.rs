//! Audit lifecycle controller — the only stateful workflow.
//!
//! Generic over repository implementations so the lifecycle rules have
//! no dependency on the database crate.

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::error::{ReclaimError, ReclaimResult};
use crate::models::audit::{Audit, AuditStatus, CreateAudit, DocumentMeta, TransitionRecord};
use crate::repository::{AuditRepository, UserRepository};
use crate::validate;

/// A requested status transition.
#[derive(Debug, Clone)]
pub struct TransitionInput {
    pub target: AuditStatus,
    /// Timeline description; a default is derived when absent.
    pub description: Option<String>,
    /// `true` for system-driven transitions (e.g. an AI-analysis pass
    /// completing), `false` for human actions.
    pub automated: bool,
    /// Applied when transitioning; required semantics only on
    /// completion, where it feeds the owner's aggregates.
    pub recovery_amount: Option<f64>,
}

pub struct LifecycleController<A: AuditRepository, U: UserRepository> {
    audits: A,
    users: U,
}

impl<A: AuditRepository, U: UserRepository> LifecycleController<A, U> {
    pub fn new(audits: A, users: U) -> Self {
        Self { audits, users }
    }

    /// Validate and create a new audit. The store writes the record with
    /// status `pending` and its initial `audit_created` timeline entry.
    pub async fn open(&self, input: CreateAudit) -> ReclaimResult<Audit> {
        validate::validate_service_name(&input.service_name)?;
        validate::validate_amount("price", input.price)?;
        self.audits.create(input).await
    }

    /// Apply a status transition. The new status and its timeline entry
    /// commit as one store write, guarded on the status the legality
    /// check ran against, so a transition never half-applies and a
    /// concurrent move invalidates this one instead of being silently
    /// overwritten. Transitions out of terminal states, and backward
    /// moves, fail with [`ReclaimError::InvalidTransition`] and leave
    /// the record unchanged.
    pub async fn transition(&self, audit_id: Uuid, input: TransitionInput) -> ReclaimResult<Audit> {
        let audit = self.audits.get_by_id(audit_id).await?;

        if !audit.status.can_transition_to(input.target) {
            return Err(ReclaimError::InvalidTransition {
                from: audit.status.as_str().into(),
                to: input.target.as_str().into(),
            });
        }

        if let Some(amount) = input.recovery_amount {
            validate::validate_amount("recovery_amount", amount)?;
        }

        let completing = input.target == AuditStatus::Completed;
        let description = input.description.unwrap_or_else(|| {
            format!(
                "Status changed from {} to {}",
                audit.status.as_str(),
                input.target.as_str()
            )
        });

        let updated = self
            .audits
            .apply_transition(
                audit_id,
                TransitionRecord {
                    from: audit.status,
                    to: input.target,
                    description,
                    automated: input.automated,
                    recovery_amount: input.recovery_amount,
                    completed_at: completing.then(Utc::now),
                },
            )
            .await?;

        if completing {
            // Best-effort secondary write; not atomic with the status
            // change, so failure is logged rather than propagated.
            if let Err(e) = self
                .users
                .record_completion(audit.user_id, updated.recovery_amount)
                .await
            {
                warn!(
                    user_id = %audit.user_id,
                    audit_id = %audit_id,
                    error = %e,
                    "failed to update owner recovery aggregates"
                );
            }
        }

        Ok(updated)
    }

    /// Attach upload metadata and record it on the timeline.
    pub async fn attach_document(
        &self,
        audit_id: Uuid,
        document: DocumentMeta,
    ) -> ReclaimResult<Audit> {
        let description = format!("Document '{}' attached", document.original_name);
        self.audits.attach_document(audit_id, document).await?;
        self.audits
            .append_timeline_event(audit_id, "document_uploaded", &description, false)
            .await
    }
}
