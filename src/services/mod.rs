//! Business logic services.

pub mod game_action;
pub mod game_session;
pub mod report;
pub mod statistics;
