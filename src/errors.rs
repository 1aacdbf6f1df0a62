use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not eligible: {0}")]
    NotEligible(String),

    #[error("Test not active: {0}")]
    TestNotActive(String),

    #[error("Already completed: {0}")]
    AlreadyCompleted(String),

    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl EngineError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::NotFound(_) => "NOT_FOUND",
            EngineError::NotEligible(_) => "NOT_ELIGIBLE",
            EngineError::TestNotActive(_) => "TEST_NOT_ACTIVE",
            EngineError::AlreadyCompleted(_) => "ALREADY_COMPLETED",
            EngineError::QuestionNotFound(_) => "QUESTION_NOT_FOUND",
            EngineError::AlreadyExists(_) => "ALREADY_EXISTS",
            EngineError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(err: validator::ValidationErrors) -> Self {
        EngineError::Validation(err.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
