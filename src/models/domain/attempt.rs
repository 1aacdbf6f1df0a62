use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum AttemptStatus {
    InProgress,
    Completed,
    // terminal, assigned by reporting when a stale session never completed
    Abandoned,
}

/// One trial of a test by a user. Completed attempts are immutable history;
/// score fields stay unset until completion.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attempt {
    pub id: String,
    pub user_id: String,
    pub test_id: String,
    pub attempt_number: u32,
    pub status: AttemptStatus,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_earned: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_points: Option<u32>,
    pub passed: bool,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub selected_option_id: String,
    pub is_correct: bool,
    pub points_earned: u32,
    pub answered_at: DateTime<Utc>,
}

impl Attempt {
    pub fn is_completed(&self) -> bool {
        self.status == AttemptStatus::Completed
    }

    /// Anchor for the retry backoff window.
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.completed_at.unwrap_or(self.started_at)
    }
}
