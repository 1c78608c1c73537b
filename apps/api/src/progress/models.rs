use serde::{Deserialize, Serialize};

/// Column names every tabular upload must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["course", "topic", "period", "score"];

/// One (course, topic, period, score) observation.
///
/// `period` is a free-text ordinal label ("Homework 1", "Week 3"), not a
/// parsed calendar date. `score` is a number in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub course: String,
    pub topic: String,
    pub period: String,
    pub score: f64,
}

impl ProgressRecord {
    /// Full-row identity used for duplicate detection. Two genuinely
    /// different observations that collide on all four fields are collapsed
    /// into one — documented behavior, there is no natural key.
    pub fn row_key(&self) -> (String, String, String, u64) {
        (
            self.course.clone(),
            self.topic.clone(),
            self.period.clone(),
            self.score.to_bits(),
        )
    }
}
