use chrono::Utc;

use crate::models::domain::{Difficulty, Subject, Test, TestResult, Topic};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub fn subject(id: i32, name: &str) -> Subject {
        Subject {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    pub fn topic(id: i32, subject_id: i32, name: &str) -> Topic {
        Topic {
            id,
            subject_id,
            name: name.to_string(),
            description: None,
        }
    }

    pub fn test(id: i32, subject_id: i32) -> Test {
        Test {
            id,
            title: format!("Test {}", id),
            description: None,
            subject_id: Some(subject_id),
            difficulty: Difficulty::Medium,
            duration_minutes: 60,
            created_at: Utc::now(),
        }
    }

    pub fn result(id: i32, user_id: i32, test_id: i32, score: i32, max_score: i32) -> TestResult {
        TestResult {
            id,
            user_id,
            test_id,
            score,
            max_score,
            time_taken_seconds: Some(600),
            completed: true,
            answers: None,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_result_percentage() {
        let r = result(1, 1, 1, 3, 4);
        assert_eq!(r.percentage(), 75.0);
    }

    #[test]
    fn test_fixtures_topic_links_subject() {
        let t = topic(10, 1, "Algebra");
        assert_eq!(t.subject_id, 1);
    }
}
