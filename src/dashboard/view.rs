//! Dashboard view model and text rendering.

use std::fmt::Write;

use chrono::{Days, NaiveDate};

use crate::models::game_session::GameSession;
use crate::services::statistics::{ms_to_rounded_seconds, GamesPerDay, Statistics};

use super::client::{DashboardData, DashboardError};

/// Days shown on the games-per-day chart, ending today.
const CHART_DAYS: u64 = 7;

/// Rows shown in the recent sessions table.
const RECENT_SESSIONS: usize = 5;

/// Width of the longest bar in the text charts.
const BAR_WIDTH: usize = 30;

/// Score distribution buckets: label and inclusive upper bound (`None` = open).
const SCORE_BUCKETS: [(&str, Option<i32>); 6] = [
    ("0-100", Some(100)),
    ("101-200", Some(200)),
    ("201-300", Some(300)),
    ("301-400", Some(400)),
    ("401-500", Some(500)),
    ("501+", None),
];

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCards {
    pub total_games: i64,
    pub avg_score: i64,
    pub avg_time_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub player: String,
    pub score: i32,
    pub time_seconds: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cards: SummaryCards,
    pub top_scores: Vec<ChartPoint>,
    pub games_per_day: Vec<ChartPoint>,
    pub score_distribution: Vec<ChartPoint>,
    pub recent_sessions: Vec<SessionRow>,
}

impl DashboardView {
    pub fn build(statistics: &Statistics, sessions: &[GameSession], today: NaiveDate) -> Self {
        Self {
            cards: SummaryCards {
                total_games: statistics.total_games,
                avg_score: statistics.avg_score.round() as i64,
                avg_time_seconds: statistics.avg_time_seconds,
            },
            top_scores: statistics
                .top_scores
                .iter()
                .map(|t| ChartPoint {
                    label: t.player_name.clone(),
                    value: i64::from(t.score),
                })
                .collect(),
            games_per_day: backfill_games_per_day(&statistics.games_per_day, today),
            score_distribution: score_distribution(sessions),
            recent_sessions: sessions
                .iter()
                .take(RECENT_SESSIONS)
                .map(|s| SessionRow {
                    player: s.player_name.clone(),
                    score: s.score,
                    time_seconds: ms_to_rounded_seconds(f64::from(s.time_played_ms)),
                    date: s.completed_at.date_naive(),
                })
                .collect(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Car Game Analytics Dashboard");
        let _ = writeln!(out);
        let _ = writeln!(out, "Total Games:    {}", self.cards.total_games);
        let _ = writeln!(out, "Average Score:  {}", self.cards.avg_score);
        let _ = writeln!(out, "Avg Play Time:  {} sec", self.cards.avg_time_seconds);

        render_chart(&mut out, "Top Scores", &self.top_scores);
        render_chart(&mut out, "Games Per Day (Last 7 Days)", &self.games_per_day);
        render_chart(&mut out, "Score Distribution", &self.score_distribution);

        let _ = writeln!(out);
        let _ = writeln!(out, "Recent Sessions");
        let _ = writeln!(out, "{:<20} {:>8} {:>9} {:>12}", "Player", "Score", "Time (s)", "Date");
        for row in &self.recent_sessions {
            let _ = writeln!(
                out,
                "{:<20} {:>8} {:>9} {:>12}",
                row.player, row.score, row.time_seconds, row.date
            );
        }
        out
    }
}

/// What the dashboard shows after loading: the view, or an inline error.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Ready(DashboardView),
    Error(String),
}

impl DashboardState {
    pub fn from_load(result: Result<DashboardData, DashboardError>, today: NaiveDate) -> Self {
        match result {
            Ok(data) => Self::Ready(DashboardView::build(&data.statistics, &data.sessions, today)),
            Err(e) => Self::Error(e.to_string()),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Ready(view) => view.render(),
            Self::Error(message) => format!("Error: {message}\n"),
        }
    }
}

/// One point per day over the last seven days, oldest first; days the
/// server left out count as zero.
pub fn backfill_games_per_day(data: &[GamesPerDay], today: NaiveDate) -> Vec<ChartPoint> {
    (0..CHART_DAYS)
        .rev()
        .map(|back| today - Days::new(back))
        .map(|day| ChartPoint {
            label: day.format("%Y-%m-%d").to_string(),
            value: data
                .iter()
                .find(|d| d.date == day)
                .map(|d| d.count)
                .unwrap_or(0),
        })
        .collect()
}

/// Session counts per score bucket, in bucket order.
pub fn score_distribution(sessions: &[GameSession]) -> Vec<ChartPoint> {
    let mut counts = [0i64; SCORE_BUCKETS.len()];
    for session in sessions {
        let bucket = SCORE_BUCKETS
            .iter()
            .position(|(_, upper)| upper.map_or(true, |upper| session.score <= upper))
            .unwrap_or(SCORE_BUCKETS.len() - 1);
        counts[bucket] += 1;
    }
    SCORE_BUCKETS
        .iter()
        .zip(counts)
        .map(|((label, _), value)| ChartPoint {
            label: label.to_string(),
            value,
        })
        .collect()
}

fn render_chart(out: &mut String, title: &str, points: &[ChartPoint]) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    let max = points.iter().map(|p| p.value).max().unwrap_or(0).max(1);
    for point in points {
        let len = (point.value.max(0) as usize * BAR_WIDTH) / max as usize;
        let _ = writeln!(out, "{:<12} {:<width$} {}", point.label, "#".repeat(len), point.value, width = BAR_WIDTH);
    }
}
