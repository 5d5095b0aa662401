use crate::error::ServiceError;
use crate::service::auth::{AuthResponse, AuthService};
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{extract::State, Json};
use cardvault_common::models::User;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/register
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ServiceError> {
    let response = AuthService::register(
        &state.pool,
        &state.config.auth.jwt_secret,
        &req.username,
        &req.email,
        &req.password,
    )
    .await?;
    tracing::info!(user_id = %response.user_id, "User registered");
    Ok(Json(response))
}

/// POST /api/auth/login
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ServiceError> {
    let response = AuthService::login(
        &state.pool,
        &state.config.auth.jwt_secret,
        &req.email,
        &req.password,
    )
    .await?;
    tracing::info!(user_id = %response.user_id, "User logged in");
    Ok(Json(response))
}

/// GET /api/auth/me
#[tracing::instrument(skip(state, auth))]
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<User>, ServiceError> {
    let user = AuthService::get_user(&state.pool, auth.0.user_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    Ok(Json(user))
}
