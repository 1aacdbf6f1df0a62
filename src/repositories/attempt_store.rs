use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::{EngineError, EngineResult};
use crate::models::domain::Attempt;

/// Append-only attempt history. The trait exposes no mutation of existing
/// records; `append` must reject an id that was already written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn append(&self, attempt: Attempt) -> EngineResult<Attempt>;
    async fn find_by_id(&self, attempt_id: &str) -> EngineResult<Option<Attempt>>;
    /// History for one (user, test) pair, oldest first.
    async fn get_history(&self, user_id: &str, test_id: &str) -> EngineResult<Vec<Attempt>>;
    async fn list_by_test(&self, test_id: &str) -> EngineResult<Vec<Attempt>>;
}

pub struct InMemoryAttemptStore {
    attempts: RwLock<Vec<Attempt>>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self {
            attempts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryAttemptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn append(&self, attempt: Attempt) -> EngineResult<Attempt> {
        let mut attempts = self.attempts.write().await;
        if attempts.iter().any(|a| a.id == attempt.id) {
            return Err(EngineError::AlreadyExists(format!(
                "attempt '{}' already recorded",
                attempt.id
            )));
        }

        log::info!(
            "recording attempt {} for user '{}' on test '{}' (passed: {})",
            attempt.attempt_number,
            attempt.user_id,
            attempt.test_id,
            attempt.passed
        );
        attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, attempt_id: &str) -> EngineResult<Option<Attempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.iter().find(|a| a.id == attempt_id).cloned())
    }

    async fn get_history(&self, user_id: &str, test_id: &str) -> EngineResult<Vec<Attempt>> {
        let attempts = self.attempts.read().await;
        let mut history: Vec<_> = attempts
            .iter()
            .filter(|a| a.user_id == user_id && a.test_id == test_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| {
            a.attempt_number
                .cmp(&b.attempt_number)
                .then(a.started_at.cmp(&b.started_at))
        });
        Ok(history)
    }

    async fn list_by_test(&self, test_id: &str) -> EngineResult<Vec<Attempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .filter(|a| a.test_id == test_id)
            .cloned()
            .collect())
    }
}
