use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::attempt::AnswerRecord;

/// Immutable output of the scoring engine for one answer set.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreResult {
    pub points_earned: u32,
    pub total_points: u32,
    /// Integer percentage, rounded half-up.
    pub score: u32,
    pub passed: bool,
    pub correct_answers: u32,
    pub answers: Vec<AnswerRecord>,
}

/// What a completed session hands back to the caller. Mirrors the Attempt
/// record appended to history, plus the wall-clock duration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptResult {
    pub attempt_id: String,
    pub test_id: String,
    pub user_id: String,
    pub attempt_number: u32,
    pub score: u32,
    pub points_earned: u32,
    pub total_points: u32,
    pub passed: bool,
    pub correct_answers: u32,
    pub total_questions: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_secs: i64,
}
