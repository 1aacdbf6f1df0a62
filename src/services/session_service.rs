use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::models::domain::{Attempt, AttemptStatus, TestSession, TestStatus};
use crate::models::dto::AttemptResult;
use crate::repositories::{AttemptStore, QuestionBank, TestCatalog};
use crate::services::eligibility_service::EligibilityService;
use crate::services::scoring_service::ScoringEngine;

#[derive(Debug)]
pub enum TickOutcome {
    Running(TestSession),
    /// The countdown hit zero; the session was finalized through the
    /// scoring path.
    TimedOut(AttemptResult),
}

/// Drives live sessions from start to the recorded attempt.
///
/// Each session sits behind its own mutex, so concurrent callers holding
/// the same session id (a countdown timer and a final answer submission,
/// two browser tabs) are serialized and the second finalizer observes
/// `AlreadyCompleted` instead of producing a duplicate attempt record.
pub struct SessionService {
    catalog: Arc<dyn TestCatalog>,
    bank: Arc<dyn QuestionBank>,
    attempts: Arc<dyn AttemptStore>,
    eligibility: Arc<EligibilityService>,
    sessions: RwLock<HashMap<String, Arc<Mutex<TestSession>>>>,
}

impl SessionService {
    pub fn new(
        catalog: Arc<dyn TestCatalog>,
        bank: Arc<dyn QuestionBank>,
        attempts: Arc<dyn AttemptStore>,
        eligibility: Arc<EligibilityService>,
    ) -> Self {
        Self {
            catalog,
            bank,
            attempts,
            eligibility,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a session for the next attempt. The test must be published and
    /// the eligibility resolver must agree before any state is created.
    pub async fn start_session(&self, user_id: &str, test_id: &str) -> EngineResult<TestSession> {
        let test = self
            .catalog
            .get_test(test_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("test with id '{}' not found", test_id)))?;

        if !test.is_active() {
            return Err(EngineError::TestNotActive(match test.status {
                TestStatus::Processing => format!("test '{}' is still processing", test_id),
                _ => format!("test '{}' is not published", test_id),
            }));
        }

        let view = self.eligibility.resolve(user_id, test_id).await?;
        if !view.can_take_now {
            return Err(EngineError::NotEligible(view.retry_message.unwrap_or_else(
                || format!("user '{}' may not take test '{}' right now", user_id, test_id),
            )));
        }

        let questions = self.bank.get_questions(test_id).await?;
        let session = TestSession::begin(
            test_id,
            user_id,
            view.attempts_used + 1,
            test.duration_secs,
            questions.len(),
            test.min_success_percentage,
            Utc::now(),
        );

        log::info!(
            "starting session '{}' (attempt {}) for user '{}' on test '{}'",
            session.id,
            session.attempt_number,
            user_id,
            test_id
        );

        let snapshot = session.clone();
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), Arc::new(Mutex::new(session)));
        Ok(snapshot)
    }

    /// Read-only snapshot of a live or completed session.
    pub async fn get_session(&self, session_id: &str) -> EngineResult<TestSession> {
        let handle = self.session_handle(session_id).await?;
        let session = handle.lock().await;
        Ok(session.clone())
    }

    pub async fn submit_answer(
        &self,
        session_id: &str,
        question_id: &str,
        selected_option_id: &str,
    ) -> EngineResult<TestSession> {
        let handle = self.session_handle(session_id).await?;
        let mut session = handle.lock().await;

        let questions = self.bank.get_questions(&session.test_id).await?;
        session.record_answer(&questions, question_id, selected_option_id, Utc::now())?;

        Ok(session.clone())
    }

    /// Burns `seconds_elapsed` off the countdown. A session whose budget
    /// reaches zero is forced through the scoring path, never left dangling.
    pub async fn tick(&self, session_id: &str, seconds_elapsed: u32) -> EngineResult<TickOutcome> {
        let handle = self.session_handle(session_id).await?;
        let mut session = handle.lock().await;

        if session.tick(seconds_elapsed)? {
            let result = self.finalize(&mut session).await?;
            return Ok(TickOutcome::TimedOut(result));
        }

        Ok(TickOutcome::Running(session.clone()))
    }

    pub async fn complete_session(&self, session_id: &str) -> EngineResult<AttemptResult> {
        let handle = self.session_handle(session_id).await?;
        let mut session = handle.lock().await;
        self.finalize(&mut session).await
    }

    async fn session_handle(&self, session_id: &str) -> EngineResult<Arc<Mutex<TestSession>>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned().ok_or_else(|| {
            EngineError::NotFound(format!("session with id '{}' not found", session_id))
        })
    }

    /// Scores the session and appends the attempt record. The caller holds
    /// the session lock; the status flip in `mark_completed` is the gate
    /// that keeps a timer/submission race down to a single attempt record.
    async fn finalize(&self, session: &mut TestSession) -> EngineResult<AttemptResult> {
        session.mark_completed()?;

        let questions = self.bank.get_questions(&session.test_id).await?;
        let result = ScoringEngine::score(&questions, &session.answers, session.min_success_percentage);
        let completed_at = Utc::now();

        let attempt = self
            .attempts
            .append(Attempt {
                id: Uuid::new_v4().to_string(),
                user_id: session.user_id.clone(),
                test_id: session.test_id.clone(),
                attempt_number: session.attempt_number,
                status: AttemptStatus::Completed,
                started_at: session.started_at,
                completed_at: Some(completed_at),
                score: Some(result.score),
                points_earned: Some(result.points_earned),
                total_points: Some(result.total_points),
                passed: result.passed,
                answers: result.answers,
            })
            .await?;

        log::info!(
            "session '{}' completed: {}% ({}/{} points, {})",
            session.id,
            result.score,
            result.points_earned,
            result.total_points,
            if result.passed { "passed" } else { "failed" }
        );

        Ok(AttemptResult {
            attempt_id: attempt.id,
            test_id: session.test_id.clone(),
            user_id: session.user_id.clone(),
            attempt_number: session.attempt_number,
            score: result.score,
            points_earned: result.points_earned,
            total_points: result.total_points,
            passed: result.passed,
            correct_answers: result.correct_answers,
            total_questions: questions.len(),
            started_at: session.started_at,
            completed_at,
            duration_secs: (completed_at - session.started_at).num_seconds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::EngineConfig;
    use crate::repositories::{InMemoryAttemptStore, InMemoryQuestionBank, InMemoryTestCatalog};
    use crate::test_utils::fixtures;

    async fn service_with_test(publish: bool) -> (SessionService, String) {
        let catalog: Arc<dyn TestCatalog> = Arc::new(InMemoryTestCatalog::new());
        let bank: Arc<dyn QuestionBank> = Arc::new(InMemoryQuestionBank::new());
        let attempts: Arc<dyn AttemptStore> = Arc::new(InMemoryAttemptStore::new());

        let mut test = fixtures::sample_test();
        if publish {
            test.status = TestStatus::Active;
            test.published_at = Some(Utc::now());
        }
        let test_id = test.id.clone();

        catalog.insert(test).await.unwrap();
        bank.put_questions(&test_id, fixtures::sample_questions())
            .await
            .unwrap();

        let eligibility = Arc::new(EligibilityService::new(
            catalog.clone(),
            attempts.clone(),
            EngineConfig::test_config(),
        ));
        let service = SessionService::new(catalog, bank, attempts.clone(), eligibility);
        (service, test_id)
    }

    #[tokio::test]
    async fn start_rejects_unpublished_test() {
        let (service, test_id) = service_with_test(false).await;

        let err = service.start_session("user-1", &test_id).await.unwrap_err();

        assert!(matches!(err, EngineError::TestNotActive(_)));
    }

    #[tokio::test]
    async fn start_rejects_unknown_test() {
        let (service, _) = service_with_test(true).await;

        let err = service.start_session("user-1", "missing").await.unwrap_err();

        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[tokio::test]
    async fn completing_twice_records_exactly_one_attempt() {
        let (service, test_id) = service_with_test(true).await;
        let session = service.start_session("user-1", &test_id).await.unwrap();

        service
            .submit_answer(&session.id, "q1", "a")
            .await
            .unwrap();

        let first = service.complete_session(&session.id).await;
        assert!(first.is_ok());

        let second = service.complete_session(&session.id).await;
        assert!(matches!(
            second.unwrap_err(),
            EngineError::AlreadyCompleted(_)
        ));

        let history = service
            .attempts
            .get_history("user-1", &test_id)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn tick_to_zero_forces_completion_through_scoring() {
        let (service, test_id) = service_with_test(true).await;
        let session = service.start_session("user-1", &test_id).await.unwrap();

        service
            .submit_answer(&session.id, "q1", "a")
            .await
            .unwrap();

        let outcome = service
            .tick(&session.id, session.time_remaining_secs)
            .await
            .unwrap();

        let TickOutcome::TimedOut(result) = outcome else {
            panic!("expected the countdown to finalize the session");
        };
        // all five questions scored, four of them as wrong
        assert_eq!(result.total_questions, 5);
        assert_eq!(result.correct_answers, 1);

        // a later tick sees the terminal state
        let err = service.tick(&session.id, 1).await.unwrap_err();
        assert!(matches!(err, EngineError::AlreadyCompleted(_)));
    }
}
