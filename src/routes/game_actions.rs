//! Game action routes.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::{ApiResponse, AppError, AppJson};
use crate::models::game_action::RecordGameAction;
use crate::services::game_action as action_service;
use crate::AppState;

/// POST /api/game-actions — record one in-game event.
pub async fn record(
    State(state): State<AppState>,
    AppJson(body): AppJson<RecordGameAction>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    action_service::record(&state.db, &body)
        .await
        .map_err(|e| e.context("Failed to record game action"))?;
    Ok((StatusCode::CREATED, ApiResponse::ok()))
}
