pub mod attempt_store;
pub mod question_bank;
pub mod test_catalog;

pub use attempt_store::{AttemptStore, InMemoryAttemptStore};
pub use question_bank::{InMemoryQuestionBank, QuestionBank};
pub use test_catalog::{InMemoryTestCatalog, TestCatalog};
