use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::attempt::AttemptStatus;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TestStatistics {
    pub test_id: String,
    pub test_name: String,
    pub total_attempts: usize,
    pub unique_users: usize,
    /// Mean score over completed attempts, one decimal place.
    pub average_score: f64,
    /// Share of completed attempts that passed, one decimal place.
    pub pass_rate: f64,
    /// Most recent first.
    pub attempts: Vec<AttemptSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptSummary {
    pub attempt_id: String,
    pub user_id: String,
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
}
