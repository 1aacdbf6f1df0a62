use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::config::EngineConfig;
use crate::errors::{EngineError, EngineResult};
use crate::models::domain::{Attempt, TestDefinition};
use crate::models::dto::{EligibilityDecision, EligibilityView};
use crate::repositories::{AttemptStore, TestCatalog};

/// Decides whether a (user, test) pair may begin a new attempt right now.
///
/// Only completed attempts participate: `attempts_used` counts them, the
/// backoff window anchors on the most recent one, and in-progress or
/// abandoned records are reporting-only.
pub struct EligibilityService {
    catalog: Arc<dyn TestCatalog>,
    attempts: Arc<dyn AttemptStore>,
    config: EngineConfig,
}

impl EligibilityService {
    pub fn new(
        catalog: Arc<dyn TestCatalog>,
        attempts: Arc<dyn AttemptStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            attempts,
            config,
        }
    }

    pub async fn resolve(&self, user_id: &str, test_id: &str) -> EngineResult<EligibilityView> {
        let test = self
            .catalog
            .get_test(test_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("test with id '{}' not found", test_id)))?;

        let history = self.attempts.get_history(user_id, test_id).await?;
        let decision = Self::evaluate(&test, &history, Utc::now(), self.config.pass_blocks_retake);

        Ok(Self::build_view(user_id, &test, &history, decision))
    }

    /// Pure decision core. Recomputing with the same inputs always yields
    /// the same answer.
    pub fn evaluate(
        test: &TestDefinition,
        history: &[Attempt],
        now: DateTime<Utc>,
        pass_blocks_retake: bool,
    ) -> EligibilityDecision {
        let completed: Vec<&Attempt> = history.iter().filter(|a| a.is_completed()).collect();
        let attempts_used = completed.len() as u32;

        let Some(last) = completed.last() else {
            return EligibilityDecision::Eligible { attempt_number: 1 };
        };

        if last.passed {
            if pass_blocks_retake {
                return EligibilityDecision::PassLocked;
            }
            return EligibilityDecision::Eligible {
                attempt_number: attempts_used + 1,
            };
        }

        // The attempt cap is checked before the backoff window so an
        // exhausted test never advertises a retry time. retry_count = 0
        // means the first failed attempt is final.
        if attempts_used >= test.retry_count {
            return EligibilityDecision::Exhausted;
        }

        let next_retry_at =
            last.finished_at() + Duration::hours(test.retry_backoff_hours as i64);
        if now < next_retry_at {
            return EligibilityDecision::Cooldown { next_retry_at };
        }

        EligibilityDecision::Eligible {
            attempt_number: attempts_used + 1,
        }
    }

    fn build_view(
        user_id: &str,
        test: &TestDefinition,
        history: &[Attempt],
        decision: EligibilityDecision,
    ) -> EligibilityView {
        let completed: Vec<&Attempt> = history.iter().filter(|a| a.is_completed()).collect();
        let attempts_used = completed.len() as u32;
        let last = completed.last();

        let (next_retry_at, retry_message) = match &decision {
            EligibilityDecision::Eligible { .. } => (None, None),
            EligibilityDecision::Cooldown { next_retry_at } => (
                Some(*next_retry_at),
                Some(format!(
                    "You can retry this test after {}",
                    next_retry_at.format("%Y-%m-%d %H:%M UTC")
                )),
            ),
            EligibilityDecision::Exhausted => (
                None,
                Some(format!(
                    "No attempts remaining ({} of {} used)",
                    attempts_used, test.retry_count
                )),
            ),
            EligibilityDecision::PassLocked => {
                (None, Some("This test has already been passed".to_string()))
            }
        };

        EligibilityView {
            test_id: test.id.clone(),
            user_id: user_id.to_string(),
            can_take_now: decision.can_take_now(),
            attempts_used,
            max_attempts: test.retry_count,
            next_retry_at,
            retry_message,
            last_score: last.and_then(|a| a.score),
            last_passed: last.map(|a| a.passed),
        }
    }
}
