use serde::Serialize;

use crate::models::domain::{Question, Test, TestResult};

/// The created test plus how many questions the pipeline produced for it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTestResponse {
    #[serde(flatten)]
    pub test: Test,
    pub question_count: usize,
}

/// Full question with its position inside a test, for `GET /api/tests/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWithOrder {
    #[serde(flatten)]
    pub question: Question,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDetailResponse {
    #[serde(flatten)]
    pub test: Test,
    pub questions: Vec<QuestionWithOrder>,
}

/// Test result enriched with the test it belongs to, for result listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultWithTest {
    #[serde(flatten)]
    pub result: TestResult,
    pub test: Option<Test>,
}
