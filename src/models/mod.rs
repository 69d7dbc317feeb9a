//! Database models and DTOs for the telemetry entities.

pub mod game_action;
pub mod game_session;
pub mod report;
