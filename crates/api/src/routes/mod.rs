pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{cards, sessions, viewer};
use crate::state::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/cards", post(cards::create))
        .route("/cards/{id}", get(cards::get_by_id))
        .route("/cards/{card_id}/sessions", post(sessions::create_for_card))
        .route(
            "/sessions/{id}",
            get(sessions::get).delete(sessions::teardown),
        )
        .route("/sessions/{id}/open", post(sessions::open))
        .route("/sessions/{id}/close", post(sessions::close))
        .route("/sessions/{id}/phase", post(sessions::phase))
}

/// Root-level routes outside `/api/v1`: the public viewer.
pub fn viewer_routes() -> Router<AppState> {
    Router::new().route("/card/{card_id}", get(viewer::view_card))
}
