use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::chart::parse_chart_json;
use crate::analysis::prompts::{
    build_analysis_prompt, build_chart_extraction_prompt, ANALYSIS_SYSTEM, JSON_ONLY_SYSTEM,
};
use crate::analysis::sections::{split_sections, SectionedReport};
use crate::errors::AppError;
use crate::extract::{extract_text, UploadedFile};
use crate::progress::models::ProgressRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    /// The raw markdown report, exactly as the model produced it.
    pub report: String,
    /// The report sliced into its three labeled sections (best effort).
    pub sections: SectionedReport,
    /// Chart rows the model extracted from the work files, if that step
    /// succeeded.
    pub chart: Option<Vec<ProgressRecord>>,
    /// Non-fatal problems: unreadable files, an omitted chart, a missing
    /// report section.
    pub warnings: Vec<String>,
    /// Archive filename the report was saved under.
    pub archived_as: String,
}

/// POST /api/v1/analysis
///
/// Multipart body: one or more work files (`.pdf`/`.docx`/`.txt`) plus a
/// `topics` text field. Extracts the text, asks the model for chart data and
/// for the three-part analysis, archives the report and resets the chat.
pub async fn handle_generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut files: Vec<UploadedFile> = Vec::new();
    let mut topics = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        if let Some(name) = field.file_name().map(str::to_string) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload '{name}': {e}")))?;
            files.push(UploadedFile { name, data });
        } else if field.name() == Some("topics") {
            topics = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Unreadable 'topics' field: {e}")))?;
        }
    }

    if files.is_empty() {
        return Err(AppError::Validation(
            "Upload at least one work file to analyze".to_string(),
        ));
    }
    if topics.trim().is_empty() {
        return Err(AppError::Validation(
            "Provide the list of course topics".to_string(),
        ));
    }

    let extraction = extract_text(&files);
    let mut warnings = extraction.warnings;
    if extraction.text.is_empty() {
        return Err(AppError::Validation(
            "None of the uploaded files produced any text".to_string(),
        ));
    }

    // Chart extraction first; any failure here degrades to "no chart"
    let chart = extract_chart(&state, &extraction.text, &mut warnings).await;

    // Store the chart rows before the analysis call so they survive a
    // failure of that step
    state.session.lock().await.chart = chart.clone();

    let prompt = build_analysis_prompt(&extraction.text, &topics);
    let response = state
        .llm
        .call(&prompt, ANALYSIS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Analysis request failed: {e}")))?;
    let report = response
        .text()
        .ok_or_else(|| AppError::Llm("Analysis response contained no text".to_string()))?
        .to_string();

    let sections = split_sections(&report);
    for key in &sections.missing {
        warnings.push(format!(
            "Report section '{key}' was not found in the model output"
        ));
    }

    // Create-on-success-only: a failed analysis never reaches this point
    let archived_as = state.archive.save(&report)?;
    info!("Analysis report archived as {archived_as}");

    state.session.lock().await.install_report(report.clone());

    Ok(Json(AnalysisResponse {
        report,
        sections,
        chart,
        warnings,
        archived_as,
    }))
}

async fn extract_chart(
    state: &AppState,
    work_text: &str,
    warnings: &mut Vec<String>,
) -> Option<Vec<ProgressRecord>> {
    let prompt = build_chart_extraction_prompt(work_text);
    let response = match state.llm.call(&prompt, JSON_ONLY_SYSTEM).await {
        Ok(r) => r,
        Err(e) => {
            warn!("Chart extraction call failed: {e}");
            warnings.push(format!("Progress chart omitted: {e}"));
            return None;
        }
    };

    let Some(text) = response.text() else {
        warnings.push("Progress chart omitted: model returned no text".to_string());
        return None;
    };

    match parse_chart_json(text) {
        Ok(rows) if !rows.is_empty() => Some(rows),
        Ok(_) => {
            warnings.push("The model found no chartable data points".to_string());
            None
        }
        Err(e) => {
            warn!("Chart extraction output unusable: {e}");
            warnings.push(format!("Progress chart omitted: {e}"));
            None
        }
    }
}
