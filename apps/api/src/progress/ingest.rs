//! Parses uploaded CSV/JSON progress data into `ProgressRecord` rows.
//!
//! Schema validation happens here, before anything touches the accumulated
//! table: a missing column fails the whole upload and leaves the table
//! unchanged.

use thiserror::Error;

use crate::errors::AppError;
use crate::progress::models::{ProgressRecord, REQUIRED_COLUMNS};

/// Missing required columns on a tabular upload. Names every absent field.
#[derive(Debug, Error)]
#[error("missing required columns: {}", missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

/// Parses one uploaded file, dispatching on its extension.
pub fn parse_table(name: &str, data: &[u8]) -> Result<Vec<ProgressRecord>, AppError> {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => parse_csv(data),
        Some("json") => parse_json(data),
        _ => Err(AppError::Validation(format!(
            "Unsupported tabular format for '{name}' (expected .csv or .json)"
        ))),
    }
}

fn parse_csv(data: &[u8]) -> Result<Vec<ProgressRecord>, AppError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| AppError::Validation(format!("Unreadable CSV header: {e}")))?
        .clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError { missing }.into());
    }

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<ProgressRecord>().enumerate() {
        let record = row.map_err(|e| {
            AppError::Validation(format!("Invalid CSV row {}: {e}", i + 1))
        })?;
        records.push(record);
    }

    Ok(records)
}

fn parse_json(data: &[u8]) -> Result<Vec<ProgressRecord>, AppError> {
    let values: Vec<serde_json::Value> = serde_json::from_slice(data)
        .map_err(|e| AppError::Validation(format!("Expected a JSON array of objects: {e}")))?;

    // Report every absent field by name before attempting conversion
    let mut missing: Vec<String> = Vec::new();
    for value in &values {
        let object = value.as_object().ok_or_else(|| {
            AppError::Validation("Expected a JSON array of objects".to_string())
        })?;
        for col in REQUIRED_COLUMNS {
            if !object.contains_key(col) && !missing.iter().any(|m| m == col) {
                missing.push(col.to_string());
            }
        }
    }
    if !missing.is_empty() {
        return Err(SchemaError { missing }.into());
    }

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value(value)
                .map_err(|e| AppError::Validation(format!("Invalid record {}: {e}", i + 1)))
        })
        .collect()
}
