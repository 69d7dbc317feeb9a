//! Game action model: one discrete in-game event tied to a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "game_action_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Start,
    MoveLeft,
    MoveRight,
    Crash,
    Finish,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Start => "START",
            ActionType::MoveLeft => "MOVE_LEFT",
            ActionType::MoveRight => "MOVE_RIGHT",
            ActionType::Crash => "CRASH",
            ActionType::Finish => "FINISH",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameAction {
    pub id: i32,
    pub session_id: i32,
    pub action_type: ActionType,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /api/game-actions`.
///
/// The action kind stays free text here; the store's enum type is the
/// authority on which kinds exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordGameAction {
    pub session_id: i32,
    pub action_type: String,
}
