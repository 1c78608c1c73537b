use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::progress::ingest::parse_table;
use crate::progress::merge::{filter_by_course, merge};
use crate::progress::models::ProgressRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Rows actually added (duplicates of existing rows don't count).
    pub added: usize,
    /// Size of the accumulated table after the merge.
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub records: Vec<ProgressRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub course: String,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub course: String,
    pub rows: Vec<ProgressRecord>,
    /// Set when `rows` is empty so the caller renders an explicit "no data"
    /// state instead of an empty chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/v1/progress/upload
///
/// Multipart body of one or more `.csv`/`.json` files with the columns
/// `course,topic,period,score`. All files are validated before any of them
/// touch the accumulated table: a schema failure leaves it unchanged.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut incoming: Vec<ProgressRecord> = Vec::new();
    let mut saw_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        saw_file = true;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload '{name}': {e}")))?;
        incoming.extend(parse_table(&name, &data)?);
    }

    if !saw_file {
        return Err(AppError::Validation(
            "Upload at least one .csv or .json file".to_string(),
        ));
    }

    let mut session = state.session.lock().await;
    let merged = merge(&session.table, &incoming);
    let added = merged.len() - session.table.len();
    session.table = merged;

    info!("Progress upload merged: {added} new rows, {} total", session.table.len());

    Ok(Json(UploadResponse {
        added,
        total: session.table.len(),
    }))
}

/// GET /api/v1/progress
/// The full accumulated table in insertion order.
pub async fn handle_get_table(State(state): State<AppState>) -> Json<TableResponse> {
    let session = state.session.lock().await;
    Json(TableResponse {
        records: session.table.clone(),
    })
}

/// GET /api/v1/progress/chart?course=...
/// Rows for one course, sorted for deterministic chart ordering.
pub async fn handle_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Json<ChartResponse> {
    let session = state.session.lock().await;
    let rows = filter_by_course(&session.table, &query.course);

    let message = if rows.is_empty() {
        Some(format!(
            "No progress data recorded for course '{}'",
            query.course
        ))
    } else {
        None
    };

    Json(ChartResponse {
        course: query.course,
        rows,
        message,
    })
}
