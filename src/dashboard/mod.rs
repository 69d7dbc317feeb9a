//! Analytics dashboard: fetches the statistics snapshot and session list
//! from the API and derives the cards, chart series, and table shown to the
//! user.

pub mod client;
pub mod view;

pub use client::{DashboardClient, DashboardData, DashboardError};
pub use view::{DashboardState, DashboardView};
