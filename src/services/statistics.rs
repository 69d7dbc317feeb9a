//! Statistics aggregation queries for the analytics dashboard.
//!
//! The five figures are independent queries run concurrently on the pool.
//! They are not read in one transaction, so a write landing between them can
//! make the snapshot disagree with itself (e.g. `totalGames` counting a
//! session that `avgScore` did not see).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::errors::AppError;

/// Number of top-scoring sessions reported.
pub const TOP_SCORES_LIMIT: i64 = 5;

/// Trailing window, in calendar days including today, for `gamesPerDay`.
pub const GAMES_PER_DAY_WINDOW: i32 = 7;

/// Aggregate snapshot returned by `GET /api/statistics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_games: i64,
    pub avg_score: f64,
    pub avg_time_ms: f64,
    pub avg_time_seconds: i64,
    pub top_scores: Vec<TopScore>,
    pub games_per_day: Vec<GamesPerDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopScore {
    pub id: i32,
    pub player_name: String,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GamesPerDay {
    pub date: NaiveDate,
    pub count: i64,
}

/// Whole seconds from a millisecond average, rounding halves up.
pub fn ms_to_rounded_seconds(ms: f64) -> i64 {
    (ms / 1000.0).round() as i64
}

/// Fetch all statistics in parallel queries.
pub async fn get_statistics(pool: &PgPool) -> Result<Statistics, AppError> {
    let (total_games, avg_score, avg_time_ms, top_scores, games_per_day) = tokio::try_join!(
        fetch_total_games(pool),
        fetch_avg_score(pool),
        fetch_avg_time_ms(pool),
        fetch_top_scores(pool),
        fetch_games_per_day(pool),
    )?;

    Ok(Statistics {
        total_games,
        avg_score,
        avg_time_ms,
        avg_time_seconds: ms_to_rounded_seconds(avg_time_ms),
        top_scores,
        games_per_day,
    })
}

async fn fetch_total_games(pool: &PgPool) -> Result<i64, AppError> {
    let row = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM game_sessions")
        .fetch_one(pool)
        .await?;
    Ok(row)
}

/// Mean score, 0 on an empty table.
async fn fetch_avg_score(pool: &PgPool) -> Result<f64, AppError> {
    let row = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(AVG(score), 0)::float8 FROM game_sessions",
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Mean play time in milliseconds, 0 on an empty table.
async fn fetch_avg_time_ms(pool: &PgPool) -> Result<f64, AppError> {
    let row = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(AVG(time_played_ms), 0)::float8 FROM game_sessions",
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}

async fn fetch_top_scores(pool: &PgPool) -> Result<Vec<TopScore>, AppError> {
    let rows = sqlx::query_as::<_, TopScore>(
        r#"
        SELECT id, player_name, score
        FROM game_sessions
        ORDER BY score DESC
        LIMIT $1
        "#,
    )
    .bind(TOP_SCORES_LIMIT)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Session counts per UTC calendar day over the trailing window; empty days are absent.
async fn fetch_games_per_day(pool: &PgPool) -> Result<Vec<GamesPerDay>, AppError> {
    let rows = sqlx::query_as::<_, GamesPerDay>(
        r#"
        SELECT (completed_at AT TIME ZONE 'UTC')::date AS date, COUNT(*) AS count
        FROM game_sessions
        WHERE completed_at >=
            ((now() AT TIME ZONE 'UTC')::date - ($1 - 1))::timestamp AT TIME ZONE 'UTC'
        GROUP BY 1
        ORDER BY date
        "#,
    )
    .bind(GAMES_PER_DAY_WINDOW)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_to_seconds() {
        assert_eq!(ms_to_rounded_seconds(0.0), 0);
        assert_eq!(ms_to_rounded_seconds(1499.0), 1);
        assert_eq!(ms_to_rounded_seconds(1500.0), 2);
        assert_eq!(ms_to_rounded_seconds(45_250.5), 45);
    }

    #[test]
    fn statistics_wire_format() {
        let stats = Statistics {
            total_games: 2,
            avg_score: 150.5,
            avg_time_ms: 30_000.0,
            avg_time_seconds: 30,
            top_scores: vec![TopScore {
                id: 1,
                player_name: "Anonymous".to_string(),
                score: 200,
            }],
            games_per_day: vec![GamesPerDay {
                date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
                count: 2,
            }],
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalGames"], 2);
        assert_eq!(json["avgTimeSeconds"], 30);
        assert_eq!(json["topScores"][0]["player_name"], "Anonymous");
        assert_eq!(json["gamesPerDay"][0]["date"], "2025-03-04");
    }
}
