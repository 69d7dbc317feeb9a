//! CSV report request DTOs and the metric whitelist.
//!
//! Each recognised metric key maps to one or more fixed output columns. The
//! SQL expressions here are static; nothing supplied by the client is ever
//! spliced into report query text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a report column is decoded from the row and rendered into the CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Decimal,
    Text,
    Timestamp,
}

/// One output column of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportColumn {
    pub label: &'static str,
    pub expression: &'static str,
    pub kind: ColumnKind,
}

const ID_COLUMNS: &[ReportColumn] = &[ReportColumn {
    label: "Master-O ID",
    expression: "gs.id",
    kind: ColumnKind::Integer,
}];

const SCORE_COLUMNS: &[ReportColumn] = &[ReportColumn {
    label: "Score",
    expression: "gs.score",
    kind: ColumnKind::Integer,
}];

const TIME_PLAYED_COLUMNS: &[ReportColumn] = &[
    ReportColumn {
        label: "Time Spent (ms)",
        expression: "gs.time_played_ms",
        kind: ColumnKind::Integer,
    },
    ReportColumn {
        label: "Time Spent (seconds)",
        expression: "(gs.time_played_ms::float8 / 1000)",
        kind: ColumnKind::Decimal,
    },
];

const COMPLETED_AT_COLUMNS: &[ReportColumn] = &[ReportColumn {
    label: "Completion Date",
    expression: "gs.completed_at",
    kind: ColumnKind::Timestamp,
}];

const PLAYER_NAME_COLUMNS: &[ReportColumn] = &[ReportColumn {
    label: "Player Name",
    expression: "gs.player_name",
    kind: ColumnKind::Text,
}];

/// Recognised report metric keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMetric {
    Id,
    Score,
    TimePlayed,
    CompletedAt,
    PlayerName,
}

impl ReportMetric {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" => Some(Self::Id),
            "score" => Some(Self::Score),
            "time_played" => Some(Self::TimePlayed),
            "completed_at" => Some(Self::CompletedAt),
            "player_name" => Some(Self::PlayerName),
            _ => None,
        }
    }

    pub fn columns(&self) -> &'static [ReportColumn] {
        match self {
            Self::Id => ID_COLUMNS,
            Self::Score => SCORE_COLUMNS,
            Self::TimePlayed => TIME_PLAYED_COLUMNS,
            Self::CompletedAt => COMPLETED_AT_COLUMNS,
            Self::PlayerName => PLAYER_NAME_COLUMNS,
        }
    }
}

/// Resolve requested metric keys to output columns, in request order.
///
/// Unknown keys are dropped; a repeated key contributes its columns once.
pub fn select_columns<S: AsRef<str>>(metrics: &[S]) -> Vec<ReportColumn> {
    let mut seen: Vec<ReportMetric> = Vec::new();
    for metric in metrics.iter().filter_map(|m| ReportMetric::from_key(m.as_ref())) {
        if !seen.contains(&metric) {
            seen.push(metric);
        }
    }
    seen.iter().flat_map(|m| m.columns().iter().copied()).collect()
}

/// Optional completion-date filter of a report request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Body of `POST /api/reports/csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default)]
    pub metrics: Vec<String>,
    pub date_range: Option<DateRange>,
}

/// Inclusive completion-time bounds, parsed and ready to bind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportBounds {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Parse both bounds. Blank bounds are treated as absent.
    pub fn resolve(&self) -> Result<ReportBounds, String> {
        Ok(ReportBounds {
            start: parse_bound(self.start.as_deref(), false)?,
            end: parse_bound(self.end.as_deref(), true)?,
        })
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, or a bare date. Inputs without
/// an offset are UTC. A bare date used as an end bound covers the whole day.
fn parse_bound(raw: Option<&str>, is_end: bool) -> Result<Option<DateTime<Utc>>, String> {
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(None),
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(at.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let at = if is_end {
            date.and_hms_micro_opt(23, 59, 59, 999_999)
        } else {
            date.and_hms_opt(0, 0, 0)
        };
        return Ok(at.map(|at| at.and_utc()));
    }

    Err(format!("Invalid date '{raw}'"))
}

/// Response payload for a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreated {
    pub download_url: String,
}
