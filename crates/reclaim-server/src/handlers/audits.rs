//! Audit endpoints: the service catalog, audit CRUD, lifecycle
//! transitions, and document metadata uploads.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use reclaim_core::{AuditRepository, TransitionInput};
use reclaim_core::error::ReclaimError;
use reclaim_core::models::audit::{Audit, AuditStatus, CreateAudit, DocumentMeta, ServiceType};
use reclaim_core::models::service::{self, ServiceOffering};
use reclaim_core::models::user::{User, UserRole};
use reclaim_core::repository::Pagination;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::extract::CurrentUser;
use crate::response::ApiError;
use crate::state::AppState;

fn owner_or_admin(user: &User, audit: &Audit) -> Result<(), ApiError> {
    if user.role == UserRole::Admin || audit.user_id == user.id {
        Ok(())
    } else {
        Err(ReclaimError::AuthorizationDenied {
            reason: "Access denied".to_string(),
        }
        .into())
    }
}

fn admin_only(user: &User) -> Result<(), ApiError> {
    if user.role == UserRole::Admin {
        Ok(())
    } else {
        Err(ReclaimError::AuthorizationDenied {
            reason: "Admin access required".to_string(),
        }
        .into())
    }
}

// --- Service catalog -----------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ServicesResponse {
    pub success: bool,
    pub services: &'static [ServiceOffering],
}

pub async fn list_services() -> Json<ServicesResponse> {
    Json(ServicesResponse {
        success: true,
        services: service::catalog(),
    })
}

// --- Audit CRUD ----------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateAuditRequest {
    pub service_type: ServiceType,
    /// Defaults to the catalog name for the service type.
    pub service_name: Option<String>,
    /// Defaults to the catalog price for the service type.
    pub price: Option<f64>,
}

impl CreateAuditRequest {
    fn into_create(self, user_id: Uuid) -> CreateAudit {
        let offering = service::offering_for(self.service_type);
        CreateAudit {
            user_id,
            service_type: self.service_type,
            service_name: self
                .service_name
                .unwrap_or_else(|| offering.name.to_string()),
            price: self.price.unwrap_or(offering.price),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub audit: Audit,
}

pub async fn create_audit(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateAuditRequest>,
) -> Result<(StatusCode, Json<AuditResponse>), ApiError> {
    let audit = state.lifecycle.open(request.into_create(user.id)).await?;

    info!(audit_id = %audit.id, user_id = %user.id, "audit created");

    Ok((
        StatusCode::CREATED,
        Json(AuditResponse {
            success: true,
            message: Some("Audit created successfully".to_string()),
            audit,
        }),
    ))
}

/// Cap on client-supplied page sizes.
const MAX_PAGE_LIMIT: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl PageParams {
    fn pagination(&self) -> Pagination {
        let default = Pagination::default();
        Pagination {
            offset: self.offset.unwrap_or(default.offset),
            limit: self.limit.unwrap_or(default.limit).min(MAX_PAGE_LIMIT),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuditListResponse {
    pub success: bool,
    pub audits: Vec<Audit>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// The caller's own audits, newest first.
pub async fn my_audits(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<PageParams>,
) -> Result<Json<AuditListResponse>, ApiError> {
    let page = state
        .audits
        .list_by_owner(user.id, params.pagination())
        .await?;

    Ok(Json(AuditListResponse {
        success: true,
        audits: page.items,
        total: page.total,
        offset: page.offset,
        limit: page.limit,
    }))
}

pub async fn get_audit(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(audit_id): Path<Uuid>,
) -> Result<Json<AuditResponse>, ApiError> {
    let audit = state.audits.get_by_id(audit_id).await?;
    owner_or_admin(&user, &audit)?;

    Ok(Json(AuditResponse {
        success: true,
        message: None,
        audit,
    }))
}

// --- Lifecycle -----------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AuditStatus,
    pub description: Option<String>,
    pub recovery_amount: Option<f64>,
}

/// Admin-only status transition. Human-triggered, so the timeline entry
/// is recorded as not automated.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(audit_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<AuditResponse>, ApiError> {
    admin_only(&user)?;

    let audit = state
        .lifecycle
        .transition(
            audit_id,
            TransitionInput {
                target: request.status,
                description: request.description,
                automated: false,
                recovery_amount: request.recovery_amount,
            },
        )
        .await?;

    info!(
        audit_id = %audit_id,
        status = audit.status.as_str(),
        admin_id = %user.id,
        "audit status updated"
    );

    Ok(Json(AuditResponse {
        success: true,
        message: Some("Audit status updated".to_string()),
        audit,
    }))
}

// --- Documents -----------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AddDocumentRequest {
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub size: u64,
    pub mime_type: String,
}

/// Attach upload metadata to an audit. The binary content is stored
/// externally; only its descriptor lands on the record.
pub async fn add_document(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(audit_id): Path<Uuid>,
    Json(request): Json<AddDocumentRequest>,
) -> Result<(StatusCode, Json<AuditResponse>), ApiError> {
    let audit = state.audits.get_by_id(audit_id).await?;
    owner_or_admin(&user, &audit)?;

    let audit = state
        .lifecycle
        .attach_document(
            audit_id,
            DocumentMeta {
                filename: request.filename,
                original_name: request.original_name,
                path: request.path,
                size: request.size,
                mime_type: request.mime_type,
                uploaded_at: Utc::now(),
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuditResponse {
            success: true,
            message: Some("Document attached".to_string()),
            audit,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_limit_is_clamped() {
        let params = PageParams {
            offset: Some(10),
            limit: Some(u64::MAX),
        };
        let page = params.pagination();
        assert_eq!(page.offset, 10);
        assert_eq!(page.limit, MAX_PAGE_LIMIT);
    }

    #[test]
    fn page_params_default_when_absent() {
        let params = PageParams {
            offset: None,
            limit: None,
        };
        let page = params.pagination();
        let default = Pagination::default();
        assert_eq!(page.offset, default.offset);
        assert_eq!(page.limit, default.limit);
    }

    #[test]
    fn create_request_fills_from_catalog() {
        let request = CreateAuditRequest {
            service_type: ServiceType::AiValidation,
            service_name: None,
            price: None,
        };
        let create = request.into_create(Uuid::nil());

        let offering = service::offering_for(ServiceType::AiValidation);
        assert_eq!(create.service_name, offering.name);
        assert_eq!(create.price, offering.price);
    }

    #[test]
    fn create_request_keeps_explicit_fields() {
        let request = CreateAuditRequest {
            service_type: ServiceType::MedicalBilling,
            service_name: Some("Hospital statement review".into()),
            price: Some(450.0),
        };
        let create = request.into_create(Uuid::nil());

        assert_eq!(create.service_name, "Hospital statement review");
        assert_eq!(create.price, 450.0);
    }
}
