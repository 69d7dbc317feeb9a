//! Game session service: create, overwrite, and list sessions.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::game_session::{GameSession, RecordGameSession};

/// Insert a new session and return its assigned id.
pub async fn create(pool: &PgPool, input: &RecordGameSession) -> Result<i32, AppError> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO game_sessions (player_name, score, time_played_ms, device_info)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(input.player_name_or_default())
    .bind(input.score)
    .bind(input.time_played)
    .bind(input.device_info_text())
    .fetch_one(pool)
    .await?;

    tracing::debug!(session_id = id, score = input.score, "Game session created");
    Ok(id)
}

/// Overwrite the mutable fields of an existing session.
///
/// `completed_at` is never touched. Fails with `NotFound` when no row matches.
pub async fn update(pool: &PgPool, id: i32, input: &RecordGameSession) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE game_sessions
        SET player_name = $1, score = $2, time_played_ms = $3, device_info = $4
        WHERE id = $5
        "#,
    )
    .bind(input.player_name_or_default())
    .bind(input.score)
    .bind(input.time_played)
    .bind(input.device_info_text())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Game session not found".to_string()));
    }

    tracing::debug!(session_id = id, score = input.score, "Game session updated");
    Ok(())
}

/// Fetch a single session by id.
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<GameSession, AppError> {
    sqlx::query_as::<_, GameSession>(
        r#"
        SELECT id, player_name, score, time_played_ms, completed_at, device_info
        FROM game_sessions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Game session not found".to_string()))
}

/// All sessions, most recently completed first.
pub async fn list(pool: &PgPool) -> Result<Vec<GameSession>, AppError> {
    let rows = sqlx::query_as::<_, GameSession>(
        r#"
        SELECT id, player_name, score, time_played_ms, completed_at, device_info
        FROM game_sessions
        ORDER BY completed_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
