use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{NewRecommendation, Recommendation},
};

#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    async fn create(&self, recommendation: NewRecommendation) -> AppResult<Recommendation>;
    /// A user's recommendations, most recent first.
    async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<Recommendation>>;
}

pub struct MongoRecommendationRepository {
    db: Database,
    collection: Collection<Recommendation>,
}

impl MongoRecommendationRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("recommendations");
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        let user_index = IndexModel::builder()
            .keys(doc! { "userId": 1, "createdAt": -1 })
            .build();
        self.collection.create_index(user_index).await?;

        Ok(())
    }
}

#[async_trait]
impl RecommendationRepository for MongoRecommendationRepository {
    async fn create(&self, recommendation: NewRecommendation) -> AppResult<Recommendation> {
        let id = self.db.next_id("recommendations").await?;
        let recommendation = recommendation.into_recommendation(id);
        self.collection.insert_one(&recommendation).await?;
        Ok(recommendation)
    }

    async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<Recommendation>> {
        let cursor = self
            .collection
            .find(doc! { "userId": user_id })
            .sort(doc! { "createdAt": -1 })
            .await?;
        let recommendations: Vec<Recommendation> = cursor.try_collect().await?;
        Ok(recommendations)
    }
}
