use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::{EngineError, EngineResult};
use crate::models::domain::TestDefinition;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestCatalog: Send + Sync {
    async fn insert(&self, test: TestDefinition) -> EngineResult<TestDefinition>;
    async fn get_test(&self, test_id: &str) -> EngineResult<Option<TestDefinition>>;
    async fn update(&self, test: TestDefinition) -> EngineResult<TestDefinition>;
    async fn list_tests(&self) -> EngineResult<Vec<TestDefinition>>;
}

/// Reference catalog backed by process memory. Stands in for whatever
/// durable store a deployment wires up behind the trait.
pub struct InMemoryTestCatalog {
    tests: RwLock<HashMap<String, TestDefinition>>,
}

impl InMemoryTestCatalog {
    pub fn new() -> Self {
        Self {
            tests: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTestCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TestCatalog for InMemoryTestCatalog {
    async fn insert(&self, test: TestDefinition) -> EngineResult<TestDefinition> {
        let mut tests = self.tests.write().await;
        if tests.contains_key(&test.id) {
            return Err(EngineError::AlreadyExists(format!(
                "test with id '{}' already exists",
                test.id
            )));
        }

        log::debug!("registering test '{}' in catalog", test.id);
        tests.insert(test.id.clone(), test.clone());
        Ok(test)
    }

    async fn get_test(&self, test_id: &str) -> EngineResult<Option<TestDefinition>> {
        let tests = self.tests.read().await;
        Ok(tests.get(test_id).cloned())
    }

    async fn update(&self, test: TestDefinition) -> EngineResult<TestDefinition> {
        let mut tests = self.tests.write().await;
        if !tests.contains_key(&test.id) {
            return Err(EngineError::NotFound(format!(
                "test with id '{}' not found",
                test.id
            )));
        }

        tests.insert(test.id.clone(), test.clone());
        Ok(test)
    }

    async fn list_tests(&self) -> EngineResult<Vec<TestDefinition>> {
        let tests = self.tests.read().await;
        let mut items: Vec<_> = tests.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }
}
