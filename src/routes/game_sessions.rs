//! Game session routes: record (create or overwrite), list, and detail.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::{ApiResponse, AppError, AppJson};
use crate::models::game_action::GameAction;
use crate::models::game_session::{GameSession, RecordGameSession, SessionCreated};
use crate::services::{game_action as action_service, game_session as session_service};
use crate::AppState;

/// POST /api/game-sessions — create a session, or overwrite one when `id` is set.
pub async fn record(
    State(state): State<AppState>,
    AppJson(body): AppJson<RecordGameSession>,
) -> Result<Response, AppError> {
    match body.update_target() {
        None => {
            let session_id = session_service::create(&state.db, &body)
                .await
                .map_err(|e| e.context("Failed to record game session"))?;
            Ok((
                StatusCode::CREATED,
                ApiResponse::success(SessionCreated { session_id }),
            )
                .into_response())
        }
        Some(id) => {
            session_service::update(&state.db, id, &body)
                .await
                .map_err(|e| e.context("Failed to record game session"))?;
            Ok((StatusCode::OK, ApiResponse::ok()).into_response())
        }
    }
}

/// GET /api/game-sessions — every session, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<GameSession>>, AppError> {
    let sessions = session_service::list(&state.db)
        .await
        .map_err(|e| e.context("Failed to fetch game sessions"))?;
    Ok(Json(sessions))
}

/// GET /api/game-sessions/{id} — a single session.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GameSession>, AppError> {
    let session = session_service::find_by_id(&state.db, id)
        .await
        .map_err(|e| e.context("Failed to fetch game session"))?;
    Ok(Json(session))
}

/// GET /api/game-sessions/{id}/actions — the actions recorded for a session.
pub async fn list_actions(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<GameAction>>, AppError> {
    let actions = action_service::list_for_session(&state.db, id)
        .await
        .map_err(|e| e.context("Failed to fetch game actions"))?;
    Ok(Json(actions))
}
