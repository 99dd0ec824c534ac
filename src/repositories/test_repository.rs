use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, ClientSession, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{NewQuestion, NewTest, Question, Test, TestQuestion},
};

#[async_trait]
pub trait TestRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Test>>;
    async fn find_all(&self, subject_id: Option<i32>) -> AppResult<Vec<Test>>;

    /// Persists a test together with its questions and ordered join rows as
    /// one unit. Join rows carry 0-based contiguous order matching the slice
    /// order of `questions`. Either everything lands or nothing does.
    async fn create_test_with_questions(
        &self,
        test: NewTest,
        questions: Vec<NewQuestion>,
    ) -> AppResult<(Test, Vec<TestQuestion>)>;

    /// Join rows of one test, ordered by position.
    async fn get_test_questions(&self, test_id: i32) -> AppResult<Vec<TestQuestion>>;
    async fn find_questions_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Question>>;
}

pub struct MongoTestRepository {
    db: Database,
    tests: Collection<Test>,
    questions: Collection<Question>,
    test_questions: Collection<TestQuestion>,
}

impl MongoTestRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            tests: db.get_collection("tests"),
            questions: db.get_collection("questions"),
            test_questions: db.get_collection("test_questions"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let unique_id = |name: &str| {
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(name.to_string())
                        .build(),
                )
                .build()
        };

        self.tests.create_index(unique_id("test_id_unique")).await?;
        self.questions
            .create_index(unique_id("question_id_unique"))
            .await?;
        self.test_questions
            .create_index(unique_id("test_question_id_unique"))
            .await?;

        // One position per test, taken once.
        let order_index = IndexModel::builder()
            .keys(doc! { "testId": 1, "order": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("test_order_unique".to_string())
                    .build(),
            )
            .build();
        self.test_questions.create_index(order_index).await?;

        Ok(())
    }

    async fn insert_all(
        &self,
        session: &mut ClientSession,
        test: &Test,
        questions: &[Question],
        join_rows: &[TestQuestion],
    ) -> AppResult<()> {
        self.tests.insert_one(test).session(&mut *session).await?;

        for question in questions {
            self.questions
                .insert_one(question)
                .session(&mut *session)
                .await?;
        }
        for row in join_rows {
            self.test_questions
                .insert_one(row)
                .session(&mut *session)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl TestRepository for MongoTestRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Test>> {
        let test = self.tests.find_one(doc! { "id": id }).await?;
        Ok(test)
    }

    async fn find_all(&self, subject_id: Option<i32>) -> AppResult<Vec<Test>> {
        let filter = match subject_id {
            Some(id) => doc! { "subjectId": id },
            None => doc! {},
        };

        let cursor = self.tests.find(filter).sort(doc! { "id": 1 }).await?;
        let tests: Vec<Test> = cursor.try_collect().await?;
        Ok(tests)
    }

    async fn create_test_with_questions(
        &self,
        test: NewTest,
        questions: Vec<NewQuestion>,
    ) -> AppResult<(Test, Vec<TestQuestion>)> {
        // Sequence ids are allocated up front; an aborted transaction only
        // costs a gap in the sequence.
        let test = test.into_test(self.db.next_id("tests").await?);

        let mut persisted_questions = Vec::with_capacity(questions.len());
        let mut join_rows = Vec::with_capacity(questions.len());

        for (index, question) in questions.into_iter().enumerate() {
            let question = question.into_question(self.db.next_id("questions").await?);
            join_rows.push(TestQuestion {
                id: self.db.next_id("test_questions").await?,
                test_id: test.id,
                question_id: question.id,
                order: index as i32,
            });
            persisted_questions.push(question);
        }

        let mut session = self.db.client().start_session().await?;
        session.start_transaction().await?;

        match self
            .insert_all(&mut session, &test, &persisted_questions, &join_rows)
            .await
        {
            Ok(()) => {
                session.commit_transaction().await?;
                Ok((test, join_rows))
            }
            Err(err) => {
                session.abort_transaction().await?;
                Err(err)
            }
        }
    }

    async fn get_test_questions(&self, test_id: i32) -> AppResult<Vec<TestQuestion>> {
        let cursor = self
            .test_questions
            .find(doc! { "testId": test_id })
            .sort(doc! { "order": 1 })
            .await?;
        let rows: Vec<TestQuestion> = cursor.try_collect().await?;
        Ok(rows)
    }

    async fn find_questions_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Question>> {
        let cursor = self
            .questions
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?;
        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }
}
