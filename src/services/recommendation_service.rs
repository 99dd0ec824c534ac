use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{NewRecommendation, Recommendation},
    repositories::RecommendationRepository,
    services::analytics_service::{AnalyticsService, TopicPerformance},
};

const WEAK_AREAS_TYPE: &str = "weak_areas";

/// One recommendation per subject that has weak topics.
fn group_by_subject(weak: &[TopicPerformance]) -> Vec<(i32, String, Vec<&TopicPerformance>)> {
    let mut groups: Vec<(i32, String, Vec<&TopicPerformance>)> = Vec::new();

    for performance in weak {
        match groups.iter_mut().find(|(id, _, _)| *id == performance.subject_id) {
            Some((_, _, members)) => members.push(performance),
            None => groups.push((
                performance.subject_id,
                performance.subject_name.clone(),
                vec![performance],
            )),
        }
    }

    groups
}

/// Turns weak-topic analytics into persisted study recommendations.
pub struct RecommendationService {
    analytics: Arc<AnalyticsService>,
    recommendations: Arc<dyn RecommendationRepository>,
}

impl RecommendationService {
    pub fn new(
        analytics: Arc<AnalyticsService>,
        recommendations: Arc<dyn RecommendationRepository>,
    ) -> Self {
        Self {
            analytics,
            recommendations,
        }
    }

    /// Recomputes weak topics and stores one recommendation per affected
    /// subject. A user with no weak topics gets an empty list and nothing is
    /// written.
    pub async fn generate_for_user(&self, user_id: i32) -> AppResult<Vec<Recommendation>> {
        let weak = self.analytics.weak_topics(user_id, None).await?;
        if weak.is_empty() {
            return Ok(Vec::new());
        }

        let mut created = Vec::new();
        for (_, subject_name, members) in group_by_subject(&weak) {
            let topic_names: Vec<&str> = members.iter().map(|m| m.topic_name.as_str()).collect();
            let topic_ids: Vec<i32> = members.iter().map(|m| m.topic_id).collect();

            let recommendation = self
                .recommendations
                .create(NewRecommendation {
                    user_id,
                    title: format!("Focus on {} weak areas", subject_name),
                    description: format!(
                        "Your recent results suggest extra practice on: {}.",
                        topic_names.join(", ")
                    ),
                    recommendation_type: WEAK_AREAS_TYPE.to_string(),
                    topic_ids: Some(topic_ids),
                })
                .await?;
            created.push(recommendation);
        }

        log::info!(
            "Generated {} recommendations for user {}",
            created.len(),
            user_id
        );
        Ok(created)
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Recommendation>> {
        self.recommendations.find_by_user(user_id).await
    }
}
