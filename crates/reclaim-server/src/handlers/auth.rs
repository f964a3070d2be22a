//! Registration and login endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use reclaim_auth::RegisterInput;
use reclaim_core::models::user::{ServiceArea, User};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub area: Option<ServiceArea>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub expires_in: u64,
    pub user: User,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state
        .auth
        .register(RegisterInput {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password: request.password,
            area: request.area,
        })
        .await?;

    info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let output = state
        .auth
        .authenticate(&request.email, &request.password)
        .await?;

    info!(user_id = %output.user.id, "user logged in");

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token: output.access_token,
        expires_in: output.expires_in,
        user: output.user,
    }))
}
