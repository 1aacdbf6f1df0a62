use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<QuestionOption>,
    pub correct_option_id: String,
    pub points: u32,
    pub is_manual: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
}

impl Question {
    pub fn new(prompt: &str, options: Vec<QuestionOption>, correct_option_id: &str, points: u32) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.to_string(),
            options,
            correct_option_id: correct_option_id.to_string(),
            points,
            is_manual: false,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn is_correct_option(&self, option_id: &str) -> bool {
        self.correct_option_id == option_id
    }
}
