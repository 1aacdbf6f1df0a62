use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::errors::{EngineError, EngineResult};
use crate::models::domain::{Question, TestDefinition, TestStatus};
use crate::repositories::{QuestionBank, TestCatalog};

/// Boundary through which the authoring flow hands definitions to the
/// engine, plus the publish lifecycle.
pub struct TestService {
    catalog: Arc<dyn TestCatalog>,
    bank: Arc<dyn QuestionBank>,
}

impl TestService {
    pub fn new(catalog: Arc<dyn TestCatalog>, bank: Arc<dyn QuestionBank>) -> Self {
        Self { catalog, bank }
    }

    pub async fn register_test(
        &self,
        test: TestDefinition,
        questions: Vec<Question>,
    ) -> EngineResult<TestDefinition> {
        test.validate()?;

        let test = self.catalog.insert(test).await?;
        self.bank.put_questions(&test.id, questions).await?;

        log::info!("registered test '{}' ({})", test.id, test.name);
        Ok(test)
    }

    pub async fn get_test(&self, test_id: &str) -> EngineResult<TestDefinition> {
        self.catalog
            .get_test(test_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("test with id '{}' not found", test_id)))
    }

    /// Inactive → Active. A test with an empty question bank can never be
    /// published.
    pub async fn publish_test(&self, test_id: &str) -> EngineResult<TestDefinition> {
        let mut test = self.get_test(test_id).await?;

        if test.status != TestStatus::Inactive {
            return Err(EngineError::Validation(
                "only inactive tests can be published".to_string(),
            ));
        }
        if self.bank.count_questions(test_id).await? == 0 {
            return Err(EngineError::Validation(
                "cannot publish a test with no questions".to_string(),
            ));
        }

        let now = Utc::now();
        test.status = TestStatus::Active;
        test.published_at = Some(now);
        test.modified_at = Some(now);

        log::info!("published test '{}'", test_id);
        self.catalog.update(test).await
    }

    /// Active → Inactive.
    pub async fn unpublish_test(&self, test_id: &str) -> EngineResult<TestDefinition> {
        let mut test = self.get_test(test_id).await?;

        if test.status != TestStatus::Active {
            return Err(EngineError::Validation(
                "only active tests can be unpublished".to_string(),
            ));
        }

        test.status = TestStatus::Inactive;
        test.modified_at = Some(Utc::now());

        log::info!("unpublished test '{}'", test_id);
        self.catalog.update(test).await
    }

    /// Processing → Inactive, once ingestion has produced the question set.
    pub async fn complete_processing(
        &self,
        test_id: &str,
        questions: Vec<Question>,
    ) -> EngineResult<TestDefinition> {
        let mut test = self.get_test(test_id).await?;

        if test.status != TestStatus::Processing {
            return Err(EngineError::Validation(
                "test is not in the processing state".to_string(),
            ));
        }

        self.bank.put_questions(test_id, questions).await?;
        test.status = TestStatus::Inactive;
        test.modified_at = Some(Utc::now());

        self.catalog.update(test).await
    }
}
