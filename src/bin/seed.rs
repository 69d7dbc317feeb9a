//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Reads the same database settings as the server (`DATABASE_URL` or the
//! `DATABASE_*` parts, reads .env).

use car_telemetry::config::AppConfig;
use car_telemetry::db;
use car_telemetry::models::game_action::ActionType;
use sqlx::PgPool;

/// (player, score, time played ms, days ago, device)
const SAMPLE_SESSIONS: &[(&str, i32, i32, i32, &str)] = &[
    ("Mika", 640, 95_000, 0, "desktop"),
    ("Anonymous", 85, 12_500, 0, "mobile"),
    ("Sam", 230, 41_000, 1, "desktop"),
    ("Jo", 410, 63_200, 2, "tablet"),
    ("Anonymous", 150, 22_800, 2, "mobile"),
    ("Mika", 520, 80_400, 4, "desktop"),
    ("Rin", 330, 52_000, 5, "desktop"),
    ("Sam", 95, 15_900, 6, "mobile"),
    ("Jo", 275, 44_300, 9, "tablet"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let pool = db::create_pool(config.connect_options()?, 5).await?;

    // Run migrations first
    db::run_migrations(&pool).await?;

    println!("=== Car Telemetry Seed Script ===");

    seed_sessions(&pool).await?;

    println!("\n=== Seed complete! ===");

    Ok(())
}

async fn seed_sessions(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM game_sessions")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Game sessions already exist ({count})");
        return Ok(());
    }

    for (player, score, time_ms, days_ago, device) in SAMPLE_SESSIONS {
        let session_id: i32 = sqlx::query_scalar(
            "INSERT INTO game_sessions (player_name, score, time_played_ms, completed_at, device_info)
             VALUES ($1, $2, $3, now() - make_interval(days => $4), $5)
             RETURNING id",
        )
        .bind(player)
        .bind(score)
        .bind(time_ms)
        .bind(days_ago)
        .bind(serde_json::json!({ "device": device }).to_string())
        .fetch_one(pool)
        .await?;

        seed_actions(pool, session_id, *score).await?;
    }

    println!("[done] Created {} sample game sessions", SAMPLE_SESSIONS.len());
    Ok(())
}

/// A plausible run: start, some steering proportional to the score, then an end.
async fn seed_actions(pool: &PgPool, session_id: i32, score: i32) -> anyhow::Result<()> {
    let mut actions = vec![ActionType::Start];
    for i in 0..(score / 100).max(1) {
        actions.push(if i % 2 == 0 {
            ActionType::MoveLeft
        } else {
            ActionType::MoveRight
        });
    }
    actions.push(if score >= 300 {
        ActionType::Finish
    } else {
        ActionType::Crash
    });

    for action in actions {
        sqlx::query("INSERT INTO game_actions (session_id, action_type) VALUES ($1, $2)")
            .bind(session_id)
            .bind(action)
            .execute(pool)
            .await?;
    }
    Ok(())
}
