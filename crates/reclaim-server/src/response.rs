//! API error type and the JSON response envelope.
//!
//! Every response body carries `success`; errors add `message`. Error
//! detail is deliberately thin on the wire — authentication failures
//! never reveal whether the email exists, and internal errors surface
//! only a generic message while the full cause goes to the log.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reclaim_core::error::ReclaimError;
use serde_json::json;
use tracing::error;

pub struct ApiError(ReclaimError);

impl From<ReclaimError> for ApiError {
    fn from(err: ReclaimError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            ReclaimError::Validation { message, .. } => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            ReclaimError::AuthenticationFailed { .. } => {
                (StatusCode::UNAUTHORIZED, "Authentication failed".to_string())
            }
            ReclaimError::AuthorizationDenied { reason } => {
                (StatusCode::FORBIDDEN, reason.clone())
            }
            ReclaimError::NotFound { entity, .. } => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            ReclaimError::AlreadyExists { entity } => {
                (StatusCode::CONFLICT, format!("{entity} already exists"))
            }
            ReclaimError::InvalidTransition { from, to } => (
                StatusCode::CONFLICT,
                format!("Cannot change status from {from} to {to}"),
            ),
            ReclaimError::Database(_) | ReclaimError::Crypto(_) | ReclaimError::Internal(_) => {
                error!(error = %self.0, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = json!({
            "success": false,
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}
