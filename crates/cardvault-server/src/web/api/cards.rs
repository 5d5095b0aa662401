use crate::error::ServiceError;
use crate::service::cards::CardService;
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use cardvault_common::models::{CardView, SharedCardView};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub card_name: String,
    pub card_number: String,
    pub expiry_date: String,
    pub card_color: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub card_name: String,
    pub expiry_date: String,
    pub card_color: String,
}

#[derive(Debug, Deserialize)]
pub struct SharedCardsQuery {
    pub token: String,
}

/// GET /api/cards
#[tracing::instrument(skip(state, auth))]
pub async fn list_cards(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<CardView>>, ServiceError> {
    let cards = CardService::list(&state.pool, auth.0.user_id).await?;
    Ok(Json(cards))
}

/// GET /api/cards/{id}
#[tracing::instrument(skip(state, auth))]
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CardView>, ServiceError> {
    let card = CardService::get(&state.pool, id, auth.0.user_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    Ok(Json(card))
}

/// POST /api/cards
#[tracing::instrument(skip(state, auth, req))]
pub async fn add_card(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<CardView>), ServiceError> {
    let card = CardService::add(
        &state.pool,
        auth.0.user_id,
        &req.card_name,
        &req.card_number,
        &req.expiry_date,
        &req.card_color,
    )
    .await?;
    tracing::info!(card_id = %card.id, user_id = %auth.0.user_id, "Card added");
    Ok((StatusCode::CREATED, Json(card)))
}

/// PUT /api/cards/{id}
#[tracing::instrument(skip(state, auth, req))]
pub async fn update_card(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCardRequest>,
) -> Result<Json<CardView>, ServiceError> {
    let card = CardService::update(
        &state.pool,
        id,
        auth.0.user_id,
        &req.card_name,
        &req.expiry_date,
        &req.card_color,
    )
    .await?;
    tracing::info!(card_id = %id, user_id = %auth.0.user_id, "Card updated");
    Ok(Json(card))
}

/// DELETE /api/cards/{id}
#[tracing::instrument(skip(state, auth))]
pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    CardService::delete(&state.pool, id, auth.0.user_id).await?;
    tracing::info!(card_id = %id, user_id = %auth.0.user_id, "Card deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/cards/shared?token=... -- no session required, the token is the
/// authorization.
#[tracing::instrument(skip(state, query))]
pub async fn shared_cards(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SharedCardsQuery>,
) -> Result<Json<Vec<SharedCardView>>, ServiceError> {
    let cards = CardService::shared(&state.pool, &query.token).await?;
    Ok(Json(cards))
}

/// GET /api/cards/generate-share-token
#[tracing::instrument(skip(auth))]
pub async fn generate_share_token(auth: AuthUser) -> Json<serde_json::Value> {
    let token = CardService::share_token(auth.0.user_id);
    Json(json!({ "token": token }))
}
