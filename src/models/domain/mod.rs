pub mod attempt;
pub mod question;
pub mod session;

pub use attempt::{AnswerRecord, Attempt, AttemptStatus};
pub use question::{Question, QuestionOption};
pub use session::{SessionAnswer, SessionStatus, TestSession};
pub use test::{TestDefinition, TestDuration, TestStatus};
