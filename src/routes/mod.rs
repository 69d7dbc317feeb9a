//! Route definitions for the telemetry API.

pub mod game_actions;
pub mod game_sessions;
pub mod health;
pub mod reports;
pub mod statistics;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the full application router.
///
/// Everything under `/api` is JSON; anything else falls through to the
/// public directory, which is where generated reports land.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let session_routes = Router::new()
        .route(
            "/game-sessions",
            get(game_sessions::list).post(game_sessions::record),
        )
        .route("/game-sessions/{id}", get(game_sessions::get_by_id))
        .route(
            "/game-sessions/{id}/actions",
            get(game_sessions::list_actions),
        )
        .route("/game-actions", post(game_actions::record));

    let analytics_routes = Router::new()
        .route("/statistics", get(statistics::get))
        .route("/reports/csv", post(reports::csv));

    let static_files = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api", session_routes.merge(analytics_routes))
        .fallback_service(static_files)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
