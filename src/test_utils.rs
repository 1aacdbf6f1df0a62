#[cfg(test)]
pub mod fixtures {
    use chrono::{DateTime, Duration, Utc};

    use crate::models::domain::{
        Attempt, AttemptStatus, Question, QuestionOption, TestDefinition, TestDuration,
    };

    fn options() -> Vec<QuestionOption> {
        ["a", "b", "c", "d"]
            .iter()
            .map(|id| QuestionOption {
                id: id.to_string(),
                text: format!("Option {}", id.to_uppercase()),
            })
            .collect()
    }

    /// Five questions worth 10 points each, ids q1..q5.
    pub fn sample_questions() -> Vec<Question> {
        let keys = [("q1", "a"), ("q2", "b"), ("q3", "a"), ("q4", "a"), ("q5", "a")];
        keys.iter()
            .enumerate()
            .map(|(i, &(id, correct))| {
                let mut q =
                    Question::new(&format!("Sample question {}", i + 1), options(), correct, 10);
                q.id = id.to_string();
                q
            })
            .collect()
    }

    /// Inactive 30-minute test, 70% to pass, 3 attempts, 24h backoff.
    pub fn sample_test() -> TestDefinition {
        let mut test =
            TestDefinition::new("Fundamentals Assessment", TestDuration::Minutes(30), 70, 3, 24);
        test.id = "test-1".to_string();
        test
    }

    pub fn completed_attempt(
        id: &str,
        user_id: &str,
        test_id: &str,
        attempt_number: u32,
        passed: bool,
        score: u32,
        started_at: DateTime<Utc>,
    ) -> Attempt {
        Attempt {
            id: id.to_string(),
            user_id: user_id.to_string(),
            test_id: test_id.to_string(),
            attempt_number,
            status: AttemptStatus::Completed,
            started_at,
            completed_at: Some(started_at + Duration::minutes(20)),
            score: Some(score),
            points_earned: Some(score / 2),
            total_points: Some(50),
            passed,
            answers: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn sample_questions_keep_their_bank_order() {
        let questions = sample_questions();

        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0].id, "q1");
        assert_eq!(questions[4].id, "q5");
        assert!(questions.iter().all(|q| q.points == 10));
    }

    #[test]
    fn sample_test_is_registerable() {
        use validator::Validate;

        let test = sample_test();

        assert!(test.validate().is_ok());
        assert_eq!(test.duration_secs, 1800);
    }
}
