#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicI32, Ordering},
    Arc,
};

use actix_web::web;
use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use testpal_server::{
    app_state::AppState,
    auth::JwtService,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        NewQuestion, NewRecommendation, NewSubject, NewTest, NewTestResult, NewTopic, Question,
        Recommendation, Subject, Test, TestQuestion, TestResult, Topic,
    },
    repositories::{
        RecommendationRepository, SubjectRepository, TestRepository, TestResultRepository,
        TopicRepository,
    },
    services::QuestionGenerator,
};

fn next(counter: &AtomicI32) -> i32 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

#[derive(Default)]
pub struct InMemorySubjectRepository {
    items: RwLock<Vec<Subject>>,
    counter: AtomicI32,
}

impl InMemorySubjectRepository {
    pub async fn seed(&self, subjects: Vec<Subject>) {
        let mut items = self.items.write().await;
        for subject in subjects {
            self.counter.fetch_max(subject.id, Ordering::SeqCst);
            items.push(subject);
        }
    }
}

#[async_trait]
impl SubjectRepository for InMemorySubjectRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Subject>> {
        Ok(self.items.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Subject>> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Subject>> {
        Ok(self.items.read().await.clone())
    }

    async fn create(&self, subject: NewSubject) -> AppResult<Subject> {
        let subject = subject.into_subject(next(&self.counter));
        self.items.write().await.push(subject.clone());
        Ok(subject)
    }
}

#[derive(Default)]
pub struct InMemoryTopicRepository {
    items: RwLock<Vec<Topic>>,
    counter: AtomicI32,
}

impl InMemoryTopicRepository {
    pub async fn seed(&self, topics: Vec<Topic>) {
        let mut items = self.items.write().await;
        for topic in topics {
            self.counter.fetch_max(topic.id, Ordering::SeqCst);
            items.push(topic);
        }
    }
}

#[async_trait]
impl TopicRepository for InMemoryTopicRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Topic>> {
        Ok(self.items.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Topic>> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self, subject_id: Option<i32>) -> AppResult<Vec<Topic>> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|t| subject_id.map_or(true, |id| t.subject_id == id))
            .cloned()
            .collect())
    }

    async fn create(&self, topic: NewTopic) -> AppResult<Topic> {
        let topic = topic.into_topic(next(&self.counter));
        self.items.write().await.push(topic.clone());
        Ok(topic)
    }
}

/// Tests, questions and join rows share one lock, so the combined insert is
/// atomic the same way the transactional implementation is.
#[derive(Default)]
pub struct InMemoryTestRepository {
    store: RwLock<TestStore>,
    test_counter: AtomicI32,
    question_counter: AtomicI32,
    join_counter: AtomicI32,
}

#[derive(Default)]
struct TestStore {
    tests: Vec<Test>,
    questions: Vec<Question>,
    test_questions: Vec<TestQuestion>,
}

impl InMemoryTestRepository {
    pub async fn seed_test(&self, test: Test) {
        let mut store = self.store.write().await;
        self.test_counter.fetch_max(test.id, Ordering::SeqCst);
        store.tests.push(test);
    }

    pub async fn seed_question(&self, question: Question) {
        let mut store = self.store.write().await;
        self.question_counter.fetch_max(question.id, Ordering::SeqCst);
        store.questions.push(question);
    }

    pub async fn seed_join(&self, row: TestQuestion) {
        let mut store = self.store.write().await;
        self.join_counter.fetch_max(row.id, Ordering::SeqCst);
        store.test_questions.push(row);
    }

    pub async fn all_tests(&self) -> Vec<Test> {
        self.store.read().await.tests.clone()
    }

    pub async fn all_questions(&self) -> Vec<Question> {
        self.store.read().await.questions.clone()
    }
}

#[async_trait]
impl TestRepository for InMemoryTestRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Test>> {
        Ok(self
            .store
            .read()
            .await
            .tests
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_all(&self, subject_id: Option<i32>) -> AppResult<Vec<Test>> {
        Ok(self
            .store
            .read()
            .await
            .tests
            .iter()
            .filter(|t| subject_id.map_or(true, |id| t.subject_id == Some(id)))
            .cloned()
            .collect())
    }

    async fn create_test_with_questions(
        &self,
        test: NewTest,
        questions: Vec<NewQuestion>,
    ) -> AppResult<(Test, Vec<TestQuestion>)> {
        let test = test.into_test(next(&self.test_counter));

        let mut store = self.store.write().await;
        let mut join_rows = Vec::with_capacity(questions.len());

        for (index, question) in questions.into_iter().enumerate() {
            let question = question.into_question(next(&self.question_counter));
            join_rows.push(TestQuestion {
                id: next(&self.join_counter),
                test_id: test.id,
                question_id: question.id,
                order: index as i32,
            });
            store.questions.push(question);
        }

        store.tests.push(test.clone());
        store.test_questions.extend(join_rows.iter().cloned());

        Ok((test, join_rows))
    }

    async fn get_test_questions(&self, test_id: i32) -> AppResult<Vec<TestQuestion>> {
        let mut rows: Vec<TestQuestion> = self
            .store
            .read()
            .await
            .test_questions
            .iter()
            .filter(|row| row.test_id == test_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.order);
        Ok(rows)
    }

    async fn find_questions_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Question>> {
        Ok(self
            .store
            .read()
            .await
            .questions
            .iter()
            .filter(|q| ids.contains(&q.id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryTestResultRepository {
    items: RwLock<Vec<TestResult>>,
    counter: AtomicI32,
}

impl InMemoryTestResultRepository {
    pub async fn seed(&self, results: Vec<TestResult>) {
        let mut items = self.items.write().await;
        for result in results {
            self.counter.fetch_max(result.id, Ordering::SeqCst);
            items.push(result);
        }
    }
}

#[async_trait]
impl TestResultRepository for InMemoryTestResultRepository {
    async fn create(&self, result: NewTestResult) -> AppResult<TestResult> {
        let result = result.into_test_result(next(&self.counter));
        self.items.write().await.push(result.clone());
        Ok(result)
    }

    async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<TestResult>> {
        let mut results: Vec<TestResult> = self
            .items
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(results)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<TestResult>> {
        Ok(self.items.read().await.iter().find(|r| r.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryRecommendationRepository {
    items: RwLock<Vec<Recommendation>>,
    counter: AtomicI32,
}

#[async_trait]
impl RecommendationRepository for InMemoryRecommendationRepository {
    async fn create(&self, recommendation: NewRecommendation) -> AppResult<Recommendation> {
        let recommendation = recommendation.into_recommendation(next(&self.counter));
        self.items.write().await.push(recommendation.clone());
        Ok(recommendation)
    }

    async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<Recommendation>> {
        let mut recommendations: Vec<Recommendation> = self
            .items
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        recommendations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recommendations)
    }
}

/// Generator that replays canned responses and records every prompt it saw.
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<Vec<AppResult<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub async fn enqueue(&self, response: AppResult<String>) {
        self.responses.lock().await.push(response);
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl QuestionGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().await.push(prompt.to_string());

        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            return Err(AppError::GenerationError(
                "no scripted response left".to_string(),
            ));
        }
        responses.remove(0)
    }
}

/// Everything a test needs to drive the app and inspect its storage.
pub struct TestHarness {
    pub state: web::Data<AppState>,
    pub jwt: web::Data<JwtService>,
    pub subjects: Arc<InMemorySubjectRepository>,
    pub topics: Arc<InMemoryTopicRepository>,
    pub tests: Arc<InMemoryTestRepository>,
    pub results: Arc<InMemoryTestResultRepository>,
    pub recommendations: Arc<InMemoryRecommendationRepository>,
    pub generator: Arc<ScriptedGenerator>,
}

impl TestHarness {
    pub fn new() -> Self {
        let config = Config::test_config();
        let jwt = web::Data::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        let subjects = Arc::new(InMemorySubjectRepository::default());
        let topics = Arc::new(InMemoryTopicRepository::default());
        let tests = Arc::new(InMemoryTestRepository::default());
        let results = Arc::new(InMemoryTestResultRepository::default());
        let recommendations = Arc::new(InMemoryRecommendationRepository::default());
        let generator = Arc::new(ScriptedGenerator::default());

        let state = web::Data::new(AppState::from_parts(
            config,
            None,
            Arc::clone(&subjects) as Arc<dyn SubjectRepository>,
            Arc::clone(&topics) as Arc<dyn TopicRepository>,
            Arc::clone(&tests) as Arc<dyn TestRepository>,
            Arc::clone(&results) as Arc<dyn TestResultRepository>,
            Arc::clone(&recommendations) as Arc<dyn RecommendationRepository>,
            Arc::clone(&generator) as Arc<dyn QuestionGenerator>,
        ));

        Self {
            state,
            jwt,
            subjects,
            topics,
            tests,
            results,
            recommendations,
            generator,
        }
    }

    pub fn token_for(&self, user_id: i32) -> String {
        self.jwt
            .create_token(user_id, "student")
            .expect("token creation should succeed")
    }
}
