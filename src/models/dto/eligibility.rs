use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the eligibility check for one (user, test) pair. Derived on
/// every request from the test configuration and completed-attempt history,
/// never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum EligibilityDecision {
    /// A new attempt may begin now.
    Eligible { attempt_number: u32 },
    /// Last attempt failed and the backoff window is still open.
    Cooldown { next_retry_at: DateTime<Utc> },
    /// Every allowed attempt has been used. Permanent.
    Exhausted,
    /// Last attempt passed and the retake policy locks passed tests.
    PassLocked,
}

impl EligibilityDecision {
    pub fn can_take_now(&self) -> bool {
        matches!(self, EligibilityDecision::Eligible { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EligibilityView {
    pub test_id: String,
    pub user_id: String,
    pub can_take_now: bool,
    pub attempts_used: u32,
    pub max_attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_retry_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_passed: Option<bool>,
}
