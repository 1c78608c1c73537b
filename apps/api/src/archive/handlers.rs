use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LoadReportResponse {
    pub name: String,
    pub report: String,
}

/// GET /api/v1/reports
/// All archived report filenames, newest first.
pub async fn handle_list_reports(
    State(state): State<AppState>,
) -> Result<Json<ReportListResponse>, AppError> {
    let reports = state.archive.list()?;
    Ok(Json(ReportListResponse { reports }))
}

/// POST /api/v1/reports/:name/load
///
/// Loads an archived report into the session as the active report. The chat
/// history and any chart from a previous analysis are cleared — an archived
/// report is text only.
pub async fn handle_load_report(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<LoadReportResponse>, AppError> {
    let report = state.archive.load(&name)?;

    state.session.lock().await.load_archived(report.clone());
    info!("Loaded archived report {name}");

    Ok(Json(LoadReportResponse { name, report }))
}
