pub mod auth;
pub mod cards;
pub mod middleware;

use crate::state::AppState;
use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Auth routes
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Card routes (owner-scoped, bearer token required)
        .route("/cards", get(cards::list_cards).post(cards::add_card))
        .route(
            "/cards/{id}",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        // Share-link routes; /cards/shared itself needs no session
        .route("/cards/shared", get(cards::shared_cards))
        .route(
            "/cards/generate-share-token",
            get(cards::generate_share_token),
        )
        .with_state(state)
}
