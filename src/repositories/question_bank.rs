use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::EngineResult;
use crate::models::domain::Question;

/// Ordered question sequences per test. Implementations must return the
/// same order on every call for a given test; cursor semantics depend on it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionBank: Send + Sync {
    async fn put_questions(&self, test_id: &str, questions: Vec<Question>) -> EngineResult<()>;
    async fn get_questions(&self, test_id: &str) -> EngineResult<Vec<Question>>;
    async fn count_questions(&self, test_id: &str) -> EngineResult<usize>;
}

pub struct InMemoryQuestionBank {
    questions: RwLock<HashMap<String, Vec<Question>>>,
}

impl InMemoryQuestionBank {
    pub fn new() -> Self {
        Self {
            questions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryQuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionBank for InMemoryQuestionBank {
    async fn put_questions(&self, test_id: &str, questions: Vec<Question>) -> EngineResult<()> {
        let mut banks = self.questions.write().await;
        log::debug!(
            "storing {} questions for test '{}'",
            questions.len(),
            test_id
        );
        banks.insert(test_id.to_string(), questions);
        Ok(())
    }

    async fn get_questions(&self, test_id: &str) -> EngineResult<Vec<Question>> {
        let banks = self.questions.read().await;
        Ok(banks.get(test_id).cloned().unwrap_or_default())
    }

    async fn count_questions(&self, test_id: &str) -> EngineResult<usize> {
        let banks = self.questions.read().await;
        Ok(banks.get(test_id).map(|q| q.len()).unwrap_or(0))
    }
}
