use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::models::domain::question::Question;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum SessionStatus {
    InProgress,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionAnswer {
    pub question_id: String,
    pub selected_option_id: String,
    pub answered_at: DateTime<Utc>,
}

/// Live state of one attempt in flight. All transitions are checked: no
/// operation mutates a completed session, the cursor never moves backwards
/// and never passes the last question index.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestSession {
    pub id: String,
    pub test_id: String,
    pub user_id: String,
    pub attempt_number: u32,
    pub started_at: DateTime<Utc>,
    pub cursor: usize,
    pub answers: Vec<SessionAnswer>,
    pub time_remaining_secs: u32,
    pub total_questions: usize,
    pub min_success_percentage: u32,
    pub status: SessionStatus,
}

impl TestSession {
    pub fn begin(
        test_id: &str,
        user_id: &str,
        attempt_number: u32,
        duration_secs: u32,
        total_questions: usize,
        min_success_percentage: u32,
        now: DateTime<Utc>,
    ) -> Self {
        TestSession {
            id: Uuid::new_v4().to_string(),
            test_id: test_id.to_string(),
            user_id: user_id.to_string(),
            attempt_number,
            started_at: now,
            cursor: 0,
            answers: Vec::new(),
            time_remaining_secs: duration_secs,
            total_questions,
            min_success_percentage,
            status: SessionStatus::InProgress,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Upserts the answer for a question and advances the cursor when the
    /// answered question is the one currently at the cursor. Revisiting an
    /// earlier question replaces its answer without moving navigation.
    pub fn record_answer(
        &mut self,
        questions: &[Question],
        question_id: &str,
        selected_option_id: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<()> {
        if self.is_completed() {
            return Err(EngineError::AlreadyCompleted(format!(
                "session '{}' is no longer accepting answers",
                self.id
            )));
        }

        if !questions.iter().any(|q| q.id == question_id) {
            return Err(EngineError::QuestionNotFound(format!(
                "question '{}' is not part of test '{}'",
                question_id, self.test_id
            )));
        }

        let answer = SessionAnswer {
            question_id: question_id.to_string(),
            selected_option_id: selected_option_id.to_string(),
            answered_at: now,
        };

        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == question_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }

        let at_cursor = questions
            .get(self.cursor)
            .map(|q| q.id == question_id)
            .unwrap_or(false);
        if at_cursor && self.cursor + 1 < questions.len() {
            self.cursor += 1;
        }

        Ok(())
    }

    /// Burns down the countdown budget. Returns true once the budget is
    /// exhausted; the caller must then finalize through the scoring path.
    pub fn tick(&mut self, seconds_elapsed: u32) -> EngineResult<bool> {
        if self.is_completed() {
            return Err(EngineError::AlreadyCompleted(format!(
                "session '{}' already completed",
                self.id
            )));
        }

        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(seconds_elapsed);
        Ok(self.time_remaining_secs == 0)
    }

    /// Compare-and-set on the session status: the first finalizer wins, any
    /// later caller observes `AlreadyCompleted`.
    pub fn mark_completed(&mut self) -> EngineResult<()> {
        if self.is_completed() {
            return Err(EngineError::AlreadyCompleted(format!(
                "session '{}' already completed",
                self.id
            )));
        }

        self.status = SessionStatus::Completed;
        Ok(())
    }
}
