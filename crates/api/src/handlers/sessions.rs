//! Handlers driving viewing sessions over HTTP.
//!
//! The viewer page starts a session for its card and then reports user
//! intents (open, close) and animation-finished signals (phase) as they
//! happen; every command returns the resulting state snapshot.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lantern_core::error::CoreError;
use lantern_core::session::{PhaseEvent, SessionSnapshot};
use lantern_core::types::CardId;
use lantern_db::repositories::CardRepo;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a newly started session.
#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub card_id: CardId,
    pub state: SessionSnapshot,
}

/// Request body for `POST /sessions/{id}/phase`.
#[derive(Debug, Deserialize)]
pub struct PhaseRequest {
    pub phase: PhaseEvent,
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Session",
        id,
    })
}

/// POST /api/v1/cards/{card_id}/sessions
///
/// Starts a read-only viewing session for an existing card.
pub async fn create_for_card(
    State(state): State<AppState>,
    Path(card_id): Path<CardId>,
) -> AppResult<(StatusCode, Json<DataResponse<SessionCreated>>)> {
    let card = CardRepo::find_by_id(&state.pool, card_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Card",
            id: card_id,
        }))?;

    let (session_id, snapshot) = state.sessions.create_for_card(&card).await;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SessionCreated {
                session_id,
                card_id: card.id,
                state: snapshot,
            },
        }),
    ))
}

/// GET /api/v1/sessions/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<SessionSnapshot>>> {
    let snapshot = state
        .sessions
        .snapshot(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/sessions/{id}/open
pub async fn open(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<SessionSnapshot>>> {
    let snapshot = state
        .sessions
        .apply(id, |session| session.request_open())
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/sessions/{id}/close
pub async fn close(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<SessionSnapshot>>> {
    let snapshot = state
        .sessions
        .apply(id, |session| session.request_close())
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/sessions/{id}/phase
pub async fn phase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PhaseRequest>,
) -> AppResult<Json<DataResponse<SessionSnapshot>>> {
    let snapshot = state
        .sessions
        .apply(id, |session| session.phase_settled(request.phase))
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// DELETE /api/v1/sessions/{id}
pub async fn teardown(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if state.sessions.teardown(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}
