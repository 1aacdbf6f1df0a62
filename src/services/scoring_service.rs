use crate::models::domain::attempt::AnswerRecord;
use crate::models::domain::{Question, SessionAnswer};
use crate::models::dto::ScoreResult;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Score a recorded answer set against the question bank.
    ///
    /// Every question contributes its points to the total; a question only
    /// earns points when an answer exists for it and the selected option is
    /// the designated correct one. Skipped questions score as wrong, they
    /// are never excluded from the total.
    pub fn score(
        questions: &[Question],
        answers: &[SessionAnswer],
        min_success_percentage: u32,
    ) -> ScoreResult {
        let mut total_points: u32 = 0;
        let mut points_earned: u32 = 0;
        let mut correct_answers: u32 = 0;
        let mut records = Vec::new();

        for question in questions {
            total_points += question.points;

            let Some(answer) = answers.iter().find(|a| a.question_id == question.id) else {
                continue;
            };

            let is_correct = question.is_correct_option(&answer.selected_option_id);
            let earned = if is_correct { question.points } else { 0 };

            if is_correct {
                points_earned += earned;
                correct_answers += 1;
            }

            records.push(AnswerRecord {
                question_id: question.id.clone(),
                selected_option_id: answer.selected_option_id.clone(),
                is_correct,
                points_earned: earned,
                answered_at: answer.answered_at,
            });
        }

        let score = Self::percentage(points_earned, total_points);

        ScoreResult {
            points_earned,
            total_points,
            score,
            passed: score >= min_success_percentage,
            correct_answers,
            answers: records,
        }
    }

    /// Integer percentage, rounded half-up: 62.5% becomes 63.
    fn percentage(earned: u32, total: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        ((200 * earned as u64 + total as u64) / (2 * total as u64)) as u32
    }
}
