use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::{EngineError, EngineResult};
use crate::models::domain::Attempt;
use crate::models::dto::{AttemptSummary, TestStatistics};
use crate::repositories::{AttemptStore, TestCatalog};

/// Per-test aggregates over the attempt history. In-progress and abandoned
/// attempts count toward totals but never toward score averages.
pub struct StatisticsService {
    catalog: Arc<dyn TestCatalog>,
    attempts: Arc<dyn AttemptStore>,
}

impl StatisticsService {
    pub fn new(catalog: Arc<dyn TestCatalog>, attempts: Arc<dyn AttemptStore>) -> Self {
        Self { catalog, attempts }
    }

    pub async fn test_statistics(&self, test_id: &str) -> EngineResult<TestStatistics> {
        let test = self
            .catalog
            .get_test(test_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("test with id '{}' not found", test_id)))?;

        let all = self.attempts.list_by_test(test_id).await?;
        let completed: Vec<&Attempt> = all.iter().filter(|a| a.is_completed()).collect();

        let unique_users: HashSet<&str> = all.iter().map(|a| a.user_id.as_str()).collect();

        let average_score = if completed.is_empty() {
            0.0
        } else {
            completed
                .iter()
                .map(|a| a.score.unwrap_or(0) as f64)
                .sum::<f64>()
                / completed.len() as f64
        };

        let passed = completed.iter().filter(|a| a.passed).count();
        let pass_rate = if completed.is_empty() {
            0.0
        } else {
            passed as f64 / completed.len() as f64 * 100.0
        };

        let mut summaries: Vec<AttemptSummary> = all
            .iter()
            .map(|a| AttemptSummary {
                attempt_id: a.id.clone(),
                user_id: a.user_id.clone(),
                attempt_number: a.attempt_number,
                status: a.status,
                started_at: a.started_at,
                completed_at: a.completed_at,
                score: a.score,
                points_earned: a.points_earned,
                total_points: a.total_points,
                passed: a.passed,
            })
            .collect();
        summaries.sort_by(|a, b| b.started_at.cmp(&a.started_at));

        Ok(TestStatistics {
            test_id: test.id,
            test_name: test.name,
            total_attempts: all.len(),
            unique_users: unique_users.len(),
            average_score: round_one_decimal(average_score),
            pass_rate: round_one_decimal(pass_rate),
            attempts: summaries,
        })
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::models::domain::AttemptStatus;
    use crate::repositories::{InMemoryAttemptStore, InMemoryTestCatalog};
    use crate::test_utils::fixtures;

    async fn seeded_service() -> (StatisticsService, String) {
        let catalog: Arc<dyn TestCatalog> = Arc::new(InMemoryTestCatalog::new());
        let attempts: Arc<dyn AttemptStore> = Arc::new(InMemoryAttemptStore::new());

        let test = fixtures::sample_test();
        let test_id = test.id.clone();
        catalog.insert(test).await.unwrap();

        let base = Utc::now() - Duration::hours(3);
        let records = vec![
            fixtures::completed_attempt("a-1", "user-1", &test_id, 1, true, 80, base),
            fixtures::completed_attempt(
                "a-2",
                "user-2",
                &test_id,
                1,
                false,
                40,
                base + Duration::hours(1),
            ),
            Attempt {
                status: AttemptStatus::InProgress,
                completed_at: None,
                score: None,
                points_earned: None,
                total_points: None,
                passed: false,
                ..fixtures::completed_attempt(
                    "a-3",
                    "user-2",
                    &test_id,
                    2,
                    false,
                    0,
                    base + Duration::hours(2),
                )
            },
        ];
        for attempt in records {
            attempts.append(attempt).await.unwrap();
        }

        (StatisticsService::new(catalog, attempts), test_id)
    }

    #[tokio::test]
    async fn aggregates_cover_all_attempts_but_average_completed_only() {
        let (service, test_id) = seeded_service().await;

        let stats = service.test_statistics(&test_id).await.unwrap();

        assert_eq!(stats.total_attempts, 3);
        assert_eq!(stats.unique_users, 2);
        assert_eq!(stats.average_score, 60.0);
        assert_eq!(stats.pass_rate, 50.0);
    }

    #[tokio::test]
    async fn summaries_are_sorted_most_recent_first() {
        let (service, test_id) = seeded_service().await;

        let stats = service.test_statistics(&test_id).await.unwrap();

        assert_eq!(stats.attempts.len(), 3);
        assert_eq!(stats.attempts[0].attempt_id, "a-3");
        assert_eq!(stats.attempts[2].attempt_id, "a-1");
        assert_eq!(stats.attempts[0].status, AttemptStatus::InProgress);
    }

    #[tokio::test]
    async fn unknown_test_reports_not_found() {
        let (service, _) = seeded_service().await;

        let err = service.test_statistics("missing").await.unwrap_err();

        assert!(matches!(err, EngineError::NotFound(_)));
    }
}
