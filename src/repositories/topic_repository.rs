use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{NewTopic, Topic},
};

#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Topic>>;
    async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Topic>>;
    /// All topics, or only those of one subject when a filter is given.
    async fn find_all(&self, subject_id: Option<i32>) -> AppResult<Vec<Topic>>;
    async fn create(&self, topic: NewTopic) -> AppResult<Topic>;
}

pub struct MongoTopicRepository {
    db: Database,
    collection: Collection<Topic>,
}

impl MongoTopicRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("topics");
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

        let subject_index = IndexModel::builder()
            .keys(doc! { "subjectId": 1 })
            .build();
        self.collection.create_index(subject_index).await?;

        Ok(())
    }
}

#[async_trait]
impl TopicRepository for MongoTopicRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Topic>> {
        let topic = self.collection.find_one(doc! { "id": id }).await?;
        Ok(topic)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Topic>> {
        let cursor = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?;
        let topics: Vec<Topic> = cursor.try_collect().await?;
        Ok(topics)
    }

    async fn find_all(&self, subject_id: Option<i32>) -> AppResult<Vec<Topic>> {
        let filter = match subject_id {
            Some(id) => doc! { "subjectId": id },
            None => doc! {},
        };

        let cursor = self.collection.find(filter).sort(doc! { "id": 1 }).await?;
        let topics: Vec<Topic> = cursor.try_collect().await?;
        Ok(topics)
    }

    async fn create(&self, topic: NewTopic) -> AppResult<Topic> {
        let id = self.db.next_id("topics").await?;
        let topic = topic.into_topic(id);
        self.collection.insert_one(&topic).await?;
        Ok(topic)
    }
}
