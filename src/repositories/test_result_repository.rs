use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{NewTestResult, TestResult},
};

#[async_trait]
pub trait TestResultRepository: Send + Sync {
    async fn create(&self, result: NewTestResult) -> AppResult<TestResult>;
    /// A user's results, most recent first.
    async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<TestResult>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<TestResult>>;
}

pub struct MongoTestResultRepository {
    db: Database,
    collection: Collection<TestResult>,
}

impl MongoTestResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("test_results");
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
            .keys(doc! { "userId": 1, "completedAt": -1 })
            .build();
        self.collection.create_index(user_index).await?;

        Ok(())
    }
}

#[async_trait]
impl TestResultRepository for MongoTestResultRepository {
    async fn create(&self, result: NewTestResult) -> AppResult<TestResult> {
        let id = self.db.next_id("test_results").await?;
        let result = result.into_test_result(id);
        self.collection.insert_one(&result).await?;
        Ok(result)
    }

    async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<TestResult>> {
        let cursor = self
            .collection
            .find(doc! { "userId": user_id })
            .sort(doc! { "completedAt": -1 })
            .await?;
        let results: Vec<TestResult> = cursor.try_collect().await?;
        Ok(results)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<TestResult>> {
        let result = self.collection.find_one(doc! { "id": id }).await?;
        Ok(result)
    }
}
