//! Text dashboard over the telemetry API.
//!
//! Usage: `cargo run --bin dashboard`
//!
//! Reads `DASHBOARD_API_URL` (default `http://localhost:3000/api`, reads .env).

use car_telemetry::dashboard::{DashboardClient, DashboardState};
use chrono::Utc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let client = DashboardClient::from_env();
    println!("Loading dashboard from {}...", client.base_url());

    let state = DashboardState::from_load(client.load().await, Utc::now().date_naive());
    print!("{}", state.render());

    if let DashboardState::Error(message) = state {
        anyhow::bail!(message);
    }
    Ok(())
}
