use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{NewSubject, Subject},
};

#[async_trait]
pub trait SubjectRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Subject>>;
    async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Subject>>;
    async fn find_all(&self) -> AppResult<Vec<Subject>>;
    async fn create(&self, subject: NewSubject) -> AppResult<Subject>;
}

pub struct MongoSubjectRepository {
    db: Database,
    collection: Collection<Subject>,
}

impl MongoSubjectRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("subjects");
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
        Ok(())
    }
}

#[async_trait]
impl SubjectRepository for MongoSubjectRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Subject>> {
        let subject = self.collection.find_one(doc! { "id": id }).await?;
        Ok(subject)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Subject>> {
        let cursor = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?;
        let subjects: Vec<Subject> = cursor.try_collect().await?;
        Ok(subjects)
    }

    async fn find_all(&self) -> AppResult<Vec<Subject>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "id": 1 }).await?;
        let subjects: Vec<Subject> = cursor.try_collect().await?;
        Ok(subjects)
    }

    async fn create(&self, subject: NewSubject) -> AppResult<Subject> {
        let id = self.db.next_id("subjects").await?;
        let subject = subject.into_subject(id);
        self.collection.insert_one(&subject).await?;
        Ok(subject)
    }
}
