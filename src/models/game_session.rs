//! Game session model: one completed playthrough.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Player name stored when the client sends none.
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameSession {
    pub id: i32,
    pub player_name: String,
    pub score: i32,
    pub time_played_ms: i32,
    pub completed_at: DateTime<Utc>,
    /// Client device metadata, serialized JSON text.
    pub device_info: Option<String>,
}

/// Body of `POST /api/game-sessions`: a create when `id` is absent, an update otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordGameSession {
    pub id: Option<i32>,
    pub player_name: Option<String>,
    pub score: i32,
    pub time_played: i32,
    pub device_info: Option<serde_json::Value>,
}

impl RecordGameSession {
    /// Target row of an update. An id of 0 counts as absent.
    pub fn update_target(&self) -> Option<i32> {
        self.id.filter(|id| *id != 0)
    }

    /// Player name with blank or missing values replaced by the default.
    pub fn player_name_or_default(&self) -> &str {
        match self.player_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_PLAYER_NAME,
        }
    }

    /// Device info as stored: JSON text, or NULL when absent.
    pub fn device_info_text(&self) -> Option<String> {
        self.device_info.as_ref().map(|info| info.to_string())
    }
}

/// Response payload for a newly created session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: i32,
}
