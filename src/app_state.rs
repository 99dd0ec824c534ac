use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoRecommendationRepository, MongoSubjectRepository, MongoTestRepository,
        MongoTestResultRepository, MongoTopicRepository, RecommendationRepository,
        SubjectRepository, TestRepository, TestResultRepository, TopicRepository,
    },
    services::{
        AnalyticsService, GeminiGenerator, QuestionGenerator, RagService, RecommendationService,
    },
};

/// Shared application state. Handlers reach everything through this; nothing
/// else is global. All collaborators sit behind trait objects so tests can
/// swap in in-memory repositories and a scripted generator.
pub struct AppState {
    pub config: Config,
    /// Absent when the state was assembled from injected parts.
    pub db: Option<Database>,

    pub subjects: Arc<dyn SubjectRepository>,
    pub topics: Arc<dyn TopicRepository>,
    pub tests: Arc<dyn TestRepository>,
    pub results: Arc<dyn TestResultRepository>,

    pub analytics: Arc<AnalyticsService>,
    pub rag: Arc<RagService>,
    pub recommendations: Arc<RecommendationService>,
}

impl AppState {
    /// Production wiring: MongoDB repositories and the Gemini client.
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let subjects = MongoSubjectRepository::new(&db);
        let topics = MongoTopicRepository::new(&db);
        let tests = MongoTestRepository::new(&db);
        let results = MongoTestResultRepository::new(&db);
        let recommendations = MongoRecommendationRepository::new(&db);

        subjects.ensure_indexes().await?;
        topics.ensure_indexes().await?;
        tests.ensure_indexes().await?;
        results.ensure_indexes().await?;
        recommendations.ensure_indexes().await?;

        let generator = Arc::new(GeminiGenerator::new(&config));

        Ok(Self::from_parts(
            config,
            Some(db),
            Arc::new(subjects),
            Arc::new(topics),
            Arc::new(tests),
            Arc::new(results),
            Arc::new(recommendations),
            generator,
        ))
    }

    /// Assembles the state from already-built collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        config: Config,
        db: Option<Database>,
        subjects: Arc<dyn SubjectRepository>,
        topics: Arc<dyn TopicRepository>,
        tests: Arc<dyn TestRepository>,
        results: Arc<dyn TestResultRepository>,
        recommendation_repo: Arc<dyn RecommendationRepository>,
        generator: Arc<dyn QuestionGenerator>,
    ) -> Self {
        let analytics = Arc::new(AnalyticsService::new(
            Arc::clone(&tests),
            Arc::clone(&results),
            Arc::clone(&topics),
            Arc::clone(&subjects),
        ));

        let rag = Arc::new(RagService::new(
            Arc::clone(&subjects),
            Arc::clone(&topics),
            Arc::clone(&tests),
            generator,
            Arc::clone(&analytics),
        ));

        let recommendations = Arc::new(RecommendationService::new(
            Arc::clone(&analytics),
            recommendation_repo,
        ));

        Self {
            config,
            db,
            subjects,
            topics,
            tests,
            results,
            analytics,
            rag,
            recommendations,
        }
    }
}
