//! Statistics route: the aggregate snapshot behind the dashboard.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::services::statistics::{self, Statistics};
use crate::AppState;

/// GET /api/statistics — counts, averages, top scores, and games per day.
pub async fn get(State(state): State<AppState>) -> Result<Json<Statistics>, AppError> {
    let stats = statistics::get_statistics(&state.db)
        .await
        .map_err(|e| e.context("Failed to fetch statistics"))?;
    Ok(Json(stats))
}
