use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{
    errors::AppResult,
    models::domain::TestResult,
    repositories::{SubjectRepository, TestRepository, TestResultRepository, TopicRepository},
};

/// Topics scoring below this average are considered weak.
pub const WEAK_TOPIC_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicPerformance {
    pub topic_id: i32,
    pub topic_name: String,
    pub subject_id: i32,
    pub subject_name: String,
    pub average_score: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPerformance {
    pub subject_id: i32,
    pub subject_name: String,
    pub average_score: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProgress {
    pub month: String,
    pub subject_id: i32,
    pub subject_name: String,
    pub average_score: i32,
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Per-user performance analytics, recomputed from test results on every
/// call. Request volume is low enough that a cache would be premature.
pub struct AnalyticsService {
    tests: Arc<dyn TestRepository>,
    results: Arc<dyn TestResultRepository>,
    topics: Arc<dyn TopicRepository>,
    subjects: Arc<dyn SubjectRepository>,
}

impl AnalyticsService {
    pub fn new(
        tests: Arc<dyn TestRepository>,
        results: Arc<dyn TestResultRepository>,
        topics: Arc<dyn TopicRepository>,
        subjects: Arc<dyn SubjectRepository>,
    ) -> Self {
        Self {
            tests,
            results,
            topics,
            subjects,
        }
    }

    /// Topics where the user's average result percentage is below 70, worst
    /// first. Each result contributes once per topic its test exercises,
    /// regardless of how many questions of that topic the test contains.
    pub async fn weak_topics(
        &self,
        user_id: i32,
        limit: Option<usize>,
    ) -> AppResult<Vec<TopicPerformance>> {
        let results = self.results.find_by_user(user_id).await?;

        // topic id -> contributing result percentages
        let mut scores_by_topic: Vec<(i32, Vec<f64>)> = Vec::new();

        for result in &results {
            let percentage = result.percentage();

            for topic_id in self.topics_exercised_by(result).await? {
                match scores_by_topic.iter_mut().find(|(id, _)| *id == topic_id) {
                    Some((_, scores)) => scores.push(percentage),
                    None => scores_by_topic.push((topic_id, vec![percentage])),
                }
            }
        }

        let topic_ids: Vec<i32> = scores_by_topic.iter().map(|(id, _)| *id).collect();
        let topics = self.topics.find_by_ids(&topic_ids).await?;
        let subject_ids: Vec<i32> = topics.iter().map(|t| t.subject_id).collect();
        let subjects = self.subjects.find_by_ids(&subject_ids).await?;

        let mut weak: Vec<TopicPerformance> = scores_by_topic
            .into_iter()
            .filter_map(|(topic_id, scores)| {
                let topic = topics.iter().find(|t| t.id == topic_id)?;
                let subject = subjects.iter().find(|s| s.id == topic.subject_id)?;
                let average_score = mean(&scores);

                Some(TopicPerformance {
                    topic_id,
                    topic_name: topic.name.clone(),
                    subject_id: subject.id,
                    subject_name: subject.name.clone(),
                    average_score,
                })
            })
            .filter(|p| p.average_score < WEAK_TOPIC_THRESHOLD)
            .collect();

        weak.sort_by(|a, b| {
            a.average_score
                .partial_cmp(&b.average_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.topic_id.cmp(&b.topic_id))
        });

        if let Some(limit) = limit {
            weak.truncate(limit);
        }

        Ok(weak)
    }

    /// Average score percentage per subject over all of the user's results.
    pub async fn performance_by_subject(&self, user_id: i32) -> AppResult<Vec<SubjectPerformance>> {
        let results = self.results.find_by_user(user_id).await?;

        // subject id -> (total score, total max score)
        let mut totals: Vec<(i32, i64, i64)> = Vec::new();

        for result in &results {
            let Some(test) = self.tests.find_by_id(result.test_id).await? else {
                continue;
            };
            let Some(subject_id) = test.subject_id else {
                continue;
            };

            match totals.iter_mut().find(|(id, _, _)| *id == subject_id) {
                Some((_, score, max)) => {
                    *score += result.score as i64;
                    *max += result.max_score as i64;
                }
                None => totals.push((subject_id, result.score as i64, result.max_score as i64)),
            }
        }

        let subject_ids: Vec<i32> = totals.iter().map(|(id, _, _)| *id).collect();
        let subjects = self.subjects.find_by_ids(&subject_ids).await?;

        Ok(totals
            .into_iter()
            .filter_map(|(subject_id, score, max)| {
                let subject = subjects.iter().find(|s| s.id == subject_id)?;
                let average_score = if max > 0 {
                    ((score as f64 / max as f64) * 100.0).round() as i32
                } else {
                    0
                };

                Some(SubjectPerformance {
                    subject_id,
                    subject_name: subject.name.clone(),
                    average_score,
                })
            })
            .collect())
    }

    /// Monthly average score per subject over the last three months, oldest
    /// month first.
    pub async fn progress_over_time(&self, user_id: i32) -> AppResult<Vec<MonthlyProgress>> {
        let cutoff: DateTime<Utc> = Utc::now() - Duration::days(90);

        let mut results = self.results.find_by_user(user_id).await?;
        results.retain(|r| r.completed_at >= cutoff);
        results.sort_by_key(|r| r.completed_at);

        // (month label, subject id) -> percentages, in first-seen order
        let mut grouped: Vec<(String, i32, Vec<f64>)> = Vec::new();

        for result in &results {
            let Some(test) = self.tests.find_by_id(result.test_id).await? else {
                continue;
            };
            let Some(subject_id) = test.subject_id else {
                continue;
            };

            let month = result.completed_at.format("%B").to_string();
            match grouped
                .iter_mut()
                .find(|(m, id, _)| *m == month && *id == subject_id)
            {
                Some((_, _, scores)) => scores.push(result.percentage()),
                None => grouped.push((month, subject_id, vec![result.percentage()])),
            }
        }

        let subject_ids: Vec<i32> = grouped.iter().map(|(_, id, _)| *id).collect();
        let subjects = self.subjects.find_by_ids(&subject_ids).await?;

        Ok(grouped
            .into_iter()
            .filter_map(|(month, subject_id, scores)| {
                let subject = subjects.iter().find(|s| s.id == subject_id)?;

                Some(MonthlyProgress {
                    month,
                    subject_id,
                    subject_name: subject.name.clone(),
                    average_score: mean(&scores).round() as i32,
                })
            })
            .collect())
    }

    /// Distinct topics behind one result's test, via its ordered join rows.
    async fn topics_exercised_by(&self, result: &TestResult) -> AppResult<Vec<i32>> {
        let test_questions = self.tests.get_test_questions(result.test_id).await?;
        let question_ids: Vec<i32> = test_questions.iter().map(|tq| tq.question_id).collect();
        let questions = self.tests.find_questions_by_ids(&question_ids).await?;

        let unique: BTreeSet<i32> = questions.iter().map(|q| q.topic_id).collect();
        Ok(unique.into_iter().collect())
    }
}
