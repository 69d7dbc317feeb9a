//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks database connectivity; 503 while the store is unreachable.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthStatus>>) {
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            ApiResponse::success(HealthStatus {
                status: "ok".to_string(),
                database: "connected".to_string(),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    success: false,
                    data: Some(HealthStatus {
                        status: "unavailable".to_string(),
                        database: format!("error: {e}"),
                    }),
                    error: Some("Database unavailable".to_string()),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use sqlx::postgres::PgPoolOptions;

    use crate::config::AppConfig;

    fn unreachable_state() -> AppState {
        let config = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Ok("postgres://postgres@127.0.0.1:1/car_game".to_string()),
            _ => Err(std::env::VarError::NotPresent),
        })
        .unwrap();
        let db = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(2))
            .connect_lazy_with(config.connect_options().unwrap());
        AppState { db, config }
    }

    #[tokio::test]
    async fn ready_is_503_when_database_is_down() {
        let (status, Json(body)) = ready(State(unreachable_state())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["error"], "Database unavailable");
    }

    #[tokio::test]
    async fn live_always_answers() {
        assert_eq!(live().await, "OK");
    }
}
