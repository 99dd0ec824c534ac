use serde::Deserialize;
use validator::Validate;

use crate::models::domain::Difficulty;

/// Body of `POST /api/generate-test`. Field names follow the public API's
/// camelCase contract.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: Option<String>,

    pub subject_id: i32,

    pub difficulty: Difficulty,

    #[validate(length(min = 1, message = "At least one topic id is required"))]
    pub topic_ids: Vec<i32>,

    #[validate(range(min = 1, max = 30))]
    pub question_count: u8,

    #[serde(default)]
    pub focus_on_weak_areas: bool,
}

/// Body of `POST /api/test-results`. The score/maxScore relation is checked in
/// the service since `validator` cannot express cross-field constraints here.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestResultRequest {
    pub test_id: i32,

    #[validate(range(min = 0))]
    pub score: i32,

    #[validate(range(min = 1))]
    pub max_score: i32,

    #[validate(range(min = 0))]
    pub time_taken_seconds: Option<i32>,

    pub answers: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectFilter {
    pub subject_id: Option<i32>,
}
