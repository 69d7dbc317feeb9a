//! Report routes: on-demand CSV export.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError, AppJson};
use crate::models::report::{ReportCreated, ReportRequest};
use crate::services::report;
use crate::AppState;

/// POST /api/reports/csv — write a CSV of the selected metrics and return its URL.
pub async fn csv(
    State(state): State<AppState>,
    AppJson(body): AppJson<ReportRequest>,
) -> Result<Json<ApiResponse<ReportCreated>>, AppError> {
    let generated = report::generate_csv(&state.db, &state.config.report_dir(), &body)
        .await
        .map_err(|e| e.context("Failed to generate CSV report"))?;
    tracing::info!(
        file = %generated.path.display(),
        rows = generated.rows,
        "CSV report generated"
    );
    Ok(ApiResponse::success(ReportCreated {
        download_url: generated.download_url(),
    }))
}
