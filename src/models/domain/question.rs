use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::test::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Essay,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,
    pub topic_id: i32,
    pub content: String,
    pub question_type: QuestionType,
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub topic_id: i32,
    pub content: String,
    pub question_type: QuestionType,
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl NewQuestion {
    pub fn into_question(self, id: i32) -> Question {
        Question {
            id,
            topic_id: self.topic_id,
            content: self.content,
            question_type: self.question_type,
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
            difficulty: self.difficulty,
            created_at: Utc::now(),
        }
    }
}

/// Ordered join row linking a question into a test. The `order` field is
/// 0-based and contiguous within a test.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQuestion {
    pub id: i32,
    pub test_id: i32,
    pub question_id: i32,
    pub order: i32,
}
