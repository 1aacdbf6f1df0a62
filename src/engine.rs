use std::sync::Arc;

use crate::config::EngineConfig;
use crate::errors::EngineResult;
use crate::models::domain::TestSession;
use crate::models::dto::{AttemptResult, EligibilityView};
use crate::repositories::{
    AttemptStore, InMemoryAttemptStore, InMemoryQuestionBank, InMemoryTestCatalog, QuestionBank,
    TestCatalog,
};
use crate::services::{
    EligibilityService, SessionService, StatisticsService, TestService, TickOutcome,
};

/// Wires the services over one set of stores and exposes the test-taking
/// surface: eligibility, session lifecycle, answers, completion.
#[derive(Clone)]
pub struct Engine {
    pub config: EngineConfig,
    pub test_service: Arc<TestService>,
    pub eligibility_service: Arc<EligibilityService>,
    pub session_service: Arc<SessionService>,
    pub statistics_service: Arc<StatisticsService>,
}

impl Engine {
    /// Engine over in-memory stores.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(InMemoryTestCatalog::new()),
            Arc::new(InMemoryQuestionBank::new()),
            Arc::new(InMemoryAttemptStore::new()),
        )
    }

    pub fn with_stores(
        config: EngineConfig,
        catalog: Arc<dyn TestCatalog>,
        bank: Arc<dyn QuestionBank>,
        attempts: Arc<dyn AttemptStore>,
    ) -> Self {
        let eligibility_service = Arc::new(EligibilityService::new(
            catalog.clone(),
            attempts.clone(),
            config.clone(),
        ));
        let session_service = Arc::new(SessionService::new(
            catalog.clone(),
            bank.clone(),
            attempts.clone(),
            eligibility_service.clone(),
        ));
        let test_service = Arc::new(TestService::new(catalog.clone(), bank));
        let statistics_service = Arc::new(StatisticsService::new(catalog, attempts));

        Self {
            config,
            test_service,
            eligibility_service,
            session_service,
            statistics_service,
        }
    }

    pub async fn resolve_eligibility(
        &self,
        user_id: &str,
        test_id: &str,
    ) -> EngineResult<EligibilityView> {
        self.eligibility_service.resolve(user_id, test_id).await
    }

    pub async fn start_session(&self, user_id: &str, test_id: &str) -> EngineResult<TestSession> {
        self.session_service.start_session(user_id, test_id).await
    }

    pub async fn get_session(&self, session_id: &str) -> EngineResult<TestSession> {
        self.session_service.get_session(session_id).await
    }

    pub async fn submit_answer(
        &self,
        session_id: &str,
        question_id: &str,
        selected_option_id: &str,
    ) -> EngineResult<TestSession> {
        self.session_service
            .submit_answer(session_id, question_id, selected_option_id)
            .await
    }

    pub async fn tick(&self, session_id: &str, seconds_elapsed: u32) -> EngineResult<TickOutcome> {
        self.session_service.tick(session_id, seconds_elapsed).await
    }

    pub async fn complete_session(&self, session_id: &str) -> EngineResult<AttemptResult> {
        self.session_service.complete_session(session_id).await
    }
}
