//! Request extractors.

use std::sync::Arc;

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use reclaim_core::models::user::User;

use crate::response::ApiError;
use crate::state::AppState;

/// The authenticated caller, resolved through the access gate.
///
/// Handlers taking this extractor are protected: a missing, invalid, or
/// expired bearer token rejects the request with 401 before the handler
/// body runs.
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .ok();
        let token = bearer
            .as_ref()
            .map(|TypedHeader(Authorization(b))| b.token());

        let user = state.gate.authorize(token).await?;
        Ok(Self(user))
    }
}
