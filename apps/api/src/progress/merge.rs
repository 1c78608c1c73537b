//! Tabular Data Merger — accumulates uploaded progress rows across the
//! session and slices them per course for charting.

use std::collections::HashSet;

use crate::progress::models::ProgressRecord;

/// Concatenates `existing` and `incoming`, dropping exact full-row
/// duplicates. The first occurrence of a row wins; order is otherwise
/// preserved. Re-uploading identical data is a no-op.
pub fn merge(existing: &[ProgressRecord], incoming: &[ProgressRecord]) -> Vec<ProgressRecord> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(existing.len() + incoming.len());

    for record in existing.iter().chain(incoming.iter()) {
        if seen.insert(record.row_key()) {
            merged.push(record.clone());
        }
    }

    merged
}

/// Equality filter on `course`, then a stable sort by `(period, topic)`.
/// The sort is lexicographic on the period label, not chronological — it
/// exists to give deterministic chart ordering, with ties keeping insertion
/// order. Callers must render an explicit "no data" state when the result is
/// empty rather than an empty chart.
pub fn filter_by_course(table: &[ProgressRecord], course: &str) -> Vec<ProgressRecord> {
    let mut rows: Vec<ProgressRecord> = table
        .iter()
        .filter(|r| r.course == course)
        .cloned()
        .collect();

    rows.sort_by(|a, b| (&a.period, &a.topic).cmp(&(&b.period, &b.topic)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(course: &str, topic: &str, period: &str, score: f64) -> ProgressRecord {
        ProgressRecord {
            course: course.to_string(),
            topic: topic.to_string(),
            period: period.to_string(),
            score,
        }
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let table = vec![rec("Calculus", "Limits", "Week 1", 70.0)];
        assert_eq!(merge(&table, &[]), table);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let table = vec![rec("Calculus", "Limits", "Week 1", 70.0)];
        let incoming = vec![
            rec("Calculus", "Derivatives", "Week 2", 55.0),
            rec("Algebra", "Factoring", "Quiz 1", 80.0),
        ];
        let once = merge(&table, &incoming);
        let twice = merge(&once, &incoming);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_duplicate_detection_is_order_insensitive() {
        let table = vec![rec("Calculus", "Limits", "Week 1", 70.0)];
        let incoming = vec![
            rec("Calculus", "Derivatives", "Week 2", 55.0),
            rec("Calculus", "Limits", "Week 1", 70.0),
        ];
        let mut reversed = incoming.clone();
        reversed.reverse();

        let a = merge(&table, &incoming);
        let b = merge(&table, &reversed);

        let keys_a: std::collections::HashSet<_> = a.iter().map(|r| r.row_key()).collect();
        let keys_b: std::collections::HashSet<_> = b.iter().map(|r| r.row_key()).collect();
        assert_eq!(keys_a, keys_b);
        // First-seen rows keep their insertion order
        assert_eq!(a[0], table[0]);
    }

    #[test]
    fn test_exact_duplicate_rows_collapse_to_one() {
        let incoming = vec![
            rec("Calculus", "Limits", "Week 1", 70.0),
            rec("Calculus", "Limits", "Week 1", 70.0),
        ];
        let merged = merge(&[], &incoming);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_near_duplicates_are_kept() {
        let incoming = vec![
            rec("Calculus", "Limits", "Week 1", 70.0),
            rec("Calculus", "Limits", "Week 1", 71.0),
        ];
        assert_eq!(merge(&[], &incoming).len(), 2);
    }

    #[test]
    fn test_filter_by_course_is_subset_with_matching_course() {
        let table = vec![
            rec("Calculus", "Limits", "Week 1", 70.0),
            rec("Algebra", "Factoring", "Quiz 1", 80.0),
            rec("Calculus", "Derivatives", "Week 2", 55.0),
        ];
        let rows = filter_by_course(&table, "Calculus");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.course == "Calculus"));
    }

    #[test]
    fn test_filter_sorts_by_period_then_topic_lexicographically() {
        let table = vec![
            rec("Calculus", "Limits", "Week 2", 70.0),
            rec("Calculus", "Derivatives", "Week 10", 55.0),
            rec("Calculus", "Chain Rule", "Week 2", 60.0),
        ];
        let rows = filter_by_course(&table, "Calculus");
        // "Week 10" < "Week 2" as strings — the sort is not chronological
        assert_eq!(rows[0].period, "Week 10");
        assert_eq!(rows[1].topic, "Chain Rule");
        assert_eq!(rows[2].topic, "Limits");
    }

    #[test]
    fn test_filter_ties_keep_insertion_order() {
        let table = vec![
            rec("Calculus", "Limits", "Week 1", 70.0),
            rec("Calculus", "Limits", "Week 1", 65.0),
        ];
        let rows = filter_by_course(&table, "Calculus");
        assert_eq!(rows[0].score, 70.0);
        assert_eq!(rows[1].score, 65.0);
    }

    #[test]
    fn test_filter_unknown_course_is_empty() {
        let table = vec![rec("Calculus", "Limits", "Week 1", 70.0)];
        assert!(filter_by_course(&table, "Spanish").is_empty());
    }
}
