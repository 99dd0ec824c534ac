use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's submitted result for one test. Append-only: created on submission
/// and never updated.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: i32,
    pub user_id: i32,
    pub test_id: i32,
    pub score: i32,
    pub max_score: i32,
    pub time_taken_seconds: Option<i32>,
    pub completed: bool,
    pub answers: Option<serde_json::Value>,
    pub completed_at: DateTime<Utc>,
}

impl TestResult {
    /// Result as a percentage in 0..=100, used by all analytics.
    pub fn percentage(&self) -> f64 {
        if self.max_score <= 0 {
            return 0.0;
        }
        (self.score as f64 / self.max_score as f64) * 100.0
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestResult {
    pub user_id: i32,
    pub test_id: i32,
    pub score: i32,
    pub max_score: i32,
    pub time_taken_seconds: Option<i32>,
    pub completed: bool,
    pub answers: Option<serde_json::Value>,
}

impl NewTestResult {
    pub fn into_test_result(self, id: i32) -> TestResult {
        TestResult {
            id,
            user_id: self.user_id,
            test_id: self.test_id,
            score: self.score,
            max_score: self.max_score,
            time_taken_seconds: self.time_taken_seconds,
            completed: self.completed,
            answers: self.answers,
            completed_at: Utc::now(),
        }
    }
}
