use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub recommendation_type: String,
    pub topic_ids: Option<Vec<i32>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecommendation {
    pub user_id: i32,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub recommendation_type: String,
    pub topic_ids: Option<Vec<i32>>,
}

impl NewRecommendation {
    pub fn into_recommendation(self, id: i32) -> Recommendation {
        Recommendation {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            recommendation_type: self.recommendation_type,
            topic_ids: self.topic_ids,
            created_at: Utc::now(),
        }
    }
}
