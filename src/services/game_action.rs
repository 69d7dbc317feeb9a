//! Game action service: record and read in-game events.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::game_action::{GameAction, RecordGameAction};

/// Insert one action.
///
/// The kind is cast to `game_action_type` by the store, which rejects
/// unknown kinds; the foreign key rejects unknown sessions.
pub async fn record(pool: &PgPool, input: &RecordGameAction) -> Result<GameAction, AppError> {
    let action = sqlx::query_as::<_, GameAction>(
        r#"
        INSERT INTO game_actions (session_id, action_type)
        VALUES ($1, $2::game_action_type)
        RETURNING id, session_id, action_type, "timestamp"
        "#,
    )
    .bind(input.session_id)
    .bind(&input.action_type)
    .fetch_one(pool)
    .await?;

    tracing::debug!(
        session_id = action.session_id,
        action_type = action.action_type.as_str(),
        "Game action recorded"
    );
    Ok(action)
}

/// Actions of one session in the order they were recorded.
pub async fn list_for_session(pool: &PgPool, session_id: i32) -> Result<Vec<GameAction>, AppError> {
    let rows = sqlx::query_as::<_, GameAction>(
        r#"
        SELECT id, session_id, action_type, "timestamp"
        FROM game_actions
        WHERE session_id = $1
        ORDER BY "timestamp", id
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
