//! Best-effort decoding of the model's chart extraction output.
//!
//! No schema is enforced beyond "a JSON array of {course, topic, period,
//! score} objects". A failure here degrades to "no chart" — it never fails
//! the analysis flow.

use thiserror::Error;

use crate::llm_client::strip_json_fences;
use crate::progress::models::ProgressRecord;

#[derive(Debug, Error)]
#[error("chart payload is not a JSON array of records: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Strips any fenced-code markers, then attempts a strict JSON decode.
pub fn parse_chart_json(raw: &str) -> Result<Vec<ProgressRecord>, ParseError> {
    let cleaned = strip_json_fences(raw);
    Ok(serde_json::from_str(cleaned)?)
}
