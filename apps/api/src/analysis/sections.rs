//! Splits the model's markdown report into its three labeled sections by
//! literal substring search on the fixed headings.
//!
//! This is inherently coupled to the model reproducing the exact heading
//! text, so a missing heading is flagged per key and never treated as a
//! failure — the other sections are still returned.

use serde::Serialize;

use crate::analysis::prompts::{HEADING_FORECAST, HEADING_STUDY_PLAN, HEADING_WEAKNESSES};

pub const SECTION_KEYS: [&str; 3] = ["weaknesses", "forecast", "study_plan"];

/// The three-section view of a report. A `None` section means its heading
/// was not found; `missing` lists those keys.
#[derive(Debug, Clone, Serialize)]
pub struct SectionedReport {
    pub weaknesses: Option<String>,
    pub forecast: Option<String>,
    pub study_plan: Option<String>,
    pub missing: Vec<&'static str>,
}

/// Locates each heading by first occurrence. A section's content is the text
/// between the end of its heading and the start of the next *found* heading,
/// or the end of the input.
pub fn split_sections(raw: &str) -> SectionedReport {
    let headings = [HEADING_WEAKNESSES, HEADING_FORECAST, HEADING_STUDY_PLAN];
    let starts: Vec<Option<usize>> = headings.iter().map(|h| raw.find(h)).collect();

    let mut sections: Vec<Option<String>> = Vec::with_capacity(3);
    let mut missing = Vec::new();

    for (i, (heading, start)) in headings.iter().zip(&starts).enumerate() {
        let Some(start) = *start else {
            sections.push(None);
            missing.push(SECTION_KEYS[i]);
            continue;
        };

        let content_start = start + heading.len();
        // End of this section: the nearest found heading that starts after it
        let content_end = starts
            .iter()
            .flatten()
            .copied()
            .filter(|&s| s > start)
            .min()
            .unwrap_or(raw.len());

        sections.push(Some(raw[content_start..content_end].trim().to_string()));
    }

    let mut drain = sections.into_iter();
    SectionedReport {
        weaknesses: drain.next().flatten(),
        forecast: drain.next().flatten(),
        study_plan: drain.next().flatten(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(parts: &[(&str, &str)]) -> String {
        parts
            .iter()
            .map(|(heading, body)| format!("{heading}\n{body}\n"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_well_formed_report_yields_three_nonempty_sections() {
        let raw = report(&[
            (HEADING_WEAKNESSES, "1. Limits\n2. Derivatives"),
            (HEADING_FORECAST, "Integrals will be hard."),
            (HEADING_STUDY_PLAN, "Review limits daily."),
        ]);
        let sections = split_sections(&raw);

        assert_eq!(
            sections.weaknesses.as_deref(),
            Some("1. Limits\n2. Derivatives")
        );
        assert_eq!(sections.forecast.as_deref(), Some("Integrals will be hard."));
        assert_eq!(sections.study_plan.as_deref(), Some("Review limits daily."));
        assert!(sections.missing.is_empty());
    }

    #[test]
    fn test_missing_middle_heading_flags_only_that_key() {
        let raw = report(&[
            (HEADING_WEAKNESSES, "1. Limits"),
            (HEADING_STUDY_PLAN, "Review limits daily."),
        ]);
        let sections = split_sections(&raw);

        // Weaknesses runs to the study plan heading, not the end of input
        assert_eq!(sections.weaknesses.as_deref(), Some("1. Limits"));
        assert!(sections.forecast.is_none());
        assert_eq!(sections.study_plan.as_deref(), Some("Review limits daily."));
        assert_eq!(sections.missing, vec!["forecast"]);
    }

    #[test]
    fn test_no_headings_flags_all_keys() {
        let sections = split_sections("free-form text without any headings");
        assert!(sections.weaknesses.is_none());
        assert!(sections.forecast.is_none());
        assert!(sections.study_plan.is_none());
        assert_eq!(sections.missing, vec!["weaknesses", "forecast", "study_plan"]);
    }

    #[test]
    fn test_last_section_runs_to_end_of_input() {
        let raw = format!("{HEADING_STUDY_PLAN}\nplan body\nmore plan");
        let sections = split_sections(&raw);
        assert_eq!(sections.study_plan.as_deref(), Some("plan body\nmore plan"));
        assert_eq!(sections.missing, vec!["weaknesses", "forecast"]);
    }

    #[test]
    fn test_preamble_before_first_heading_is_ignored() {
        let raw = format!("Here is your analysis:\n\n{HEADING_WEAKNESSES}\nbody");
        let sections = split_sections(&raw);
        assert_eq!(sections.weaknesses.as_deref(), Some("body"));
    }

    #[test]
    fn test_empty_section_body_is_empty_string_not_missing() {
        let raw = format!("{HEADING_WEAKNESSES}\n{HEADING_FORECAST}\nforecast body");
        let sections = split_sections(&raw);
        assert_eq!(sections.weaknesses.as_deref(), Some(""));
        assert_eq!(sections.forecast.as_deref(), Some("forecast body"));
        assert!(!sections.missing.contains(&"weaknesses"));
    }
}
