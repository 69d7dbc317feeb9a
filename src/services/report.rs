//! CSV report generation: whitelist-driven SELECT, CSV rendering, and file output.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tokio::io::AsyncWriteExt;

use crate::errors::AppError;
use crate::models::report::{select_columns, ColumnKind, ReportBounds, ReportColumn, ReportRequest};

/// URL prefix under which the report directory is served.
pub const REPORTS_URL_PREFIX: &str = "/reports";

/// A written report file.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub file_name: String,
    pub path: PathBuf,
    pub rows: usize,
}

impl GeneratedReport {
    pub fn download_url(&self) -> String {
        format!("{REPORTS_URL_PREFIX}/{}", self.file_name)
    }
}

/// Run the report query and write the CSV into `report_dir`.
///
/// Validation happens before any query or filesystem access, so a rejected
/// request leaves no file behind.
pub async fn generate_csv(
    pool: &PgPool,
    report_dir: &Path,
    request: &ReportRequest,
) -> Result<GeneratedReport, AppError> {
    let columns = select_columns(&request.metrics);
    if columns.is_empty() {
        return Err(AppError::Validation("No metrics selected".to_string()));
    }

    let bounds = match &request.date_range {
        Some(range) => range.resolve().map_err(AppError::Validation)?,
        None => ReportBounds::default(),
    };

    let mut query = build_query(&columns, &bounds);
    let rows = query.build().fetch_all(pool).await?;

    let csv = render_csv(&columns, &rows)?;
    let (file_name, path) = write_report_file(report_dir, &csv, Utc::now()).await?;

    tracing::debug!(columns = columns.len(), "CSV report rendered");

    Ok(GeneratedReport {
        file_name,
        path,
        rows: rows.len(),
    })
}

/// Assemble the report SELECT. Column expressions come from the static
/// whitelist; bounds are bound parameters.
pub fn build_query<'a>(columns: &[ReportColumn], bounds: &ReportBounds) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
    {
        let mut select = qb.separated(", ");
        for column in columns {
            select.push(format!("{} AS \"{}\"", column.expression, column.label));
        }
    }
    qb.push(" FROM game_sessions gs");

    let mut has_where = false;
    if let Some(start) = bounds.start {
        qb.push(" WHERE gs.completed_at >= ");
        qb.push_bind(start);
        has_where = true;
    }
    if let Some(end) = bounds.end {
        qb.push(if has_where { " AND " } else { " WHERE " });
        qb.push("gs.completed_at <= ");
        qb.push_bind(end);
    }
    qb.push(" ORDER BY gs.id");
    qb
}

/// Serialize rows to CSV with the column labels as header.
pub fn render_csv(columns: &[ReportColumn], rows: &[PgRow]) -> Result<Vec<u8>, AppError> {
    let records = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| render_cell(row, i, column.kind))
                .collect::<Result<Vec<String>, sqlx::Error>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    write_csv(columns, &records)
}

/// Write header and pre-rendered records to an in-memory CSV.
pub fn write_csv(columns: &[ReportColumn], records: &[Vec<String>]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|c| c.label))?;
    for record in records {
        writer.write_record(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV: {e}")))
}

fn render_cell(row: &PgRow, index: usize, kind: ColumnKind) -> Result<String, sqlx::Error> {
    let cell = match kind {
        ColumnKind::Integer => row.try_get::<Option<i32>, _>(index)?.map(|v| v.to_string()),
        ColumnKind::Decimal => row.try_get::<Option<f64>, _>(index)?.map(|v| format!("{v:.3}")),
        ColumnKind::Text => row.try_get::<Option<String>, _>(index)?,
        ColumnKind::Timestamp => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(|v| v.to_rfc3339_opts(SecondsFormat::Secs, true)),
    };
    Ok(cell.unwrap_or_default())
}

/// Base file name for a report generated at `at` (UTC wall time).
pub fn report_file_name(at: DateTime<Utc>) -> String {
    format!("game_report_{}", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write `contents` to a fresh file in `dir`, creating the directory on demand.
///
/// Never overwrites: a name already taken within the same second gets a
/// `-1`, `-2`, ... suffix.
pub async fn write_report_file(
    dir: &Path,
    contents: &[u8],
    at: DateTime<Utc>,
) -> Result<(String, PathBuf), AppError> {
    tokio::fs::create_dir_all(dir).await?;

    let base = report_file_name(at);
    let mut attempt = 0u32;
    loop {
        let file_name = if attempt == 0 {
            format!("{base}.csv")
        } else {
            format!("{base}-{attempt}.csv")
        };
        let path = dir.join(&file_name);

        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(mut file) => {
                file.write_all(contents).await?;
                file.flush().await?;
                return Ok((file_name, path));
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}
