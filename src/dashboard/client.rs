//! HTTP client for the telemetry API.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::models::game_session::GameSession;
use crate::services::statistics::Statistics;

/// API base URL used when `DASHBOARD_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Failed to fetch data")]
    Status(reqwest::StatusCode),

    #[error("Failed to fetch data: {0}")]
    Http(#[from] reqwest::Error),
}

/// Everything the dashboard renders, fetched in one go.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub statistics: Statistics,
    pub sessions: Vec<GameSession>,
}

#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("DASHBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_statistics(&self) -> Result<Statistics, DashboardError> {
        self.get_json("statistics").await
    }

    pub async fn fetch_sessions(&self) -> Result<Vec<GameSession>, DashboardError> {
        self.get_json("game-sessions").await
    }

    /// Fetch statistics and sessions concurrently. Either failing fails the load.
    pub async fn load(&self) -> Result<DashboardData, DashboardError> {
        let (statistics, sessions) =
            tokio::try_join!(self.fetch_statistics(), self.fetch_sessions())?;
        Ok(DashboardData {
            statistics,
            sessions,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        let response = self
            .http
            .get(format!("{}/{path}", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(DashboardError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}
