pub mod analytics_service;
pub mod generation;
pub mod prompt_builder;
pub mod rag_service;
pub mod recommendation_service;
pub mod response_parser;

pub use analytics_service::AnalyticsService;
pub use generation::{GeminiGenerator, QuestionGenerator};
pub use rag_service::RagService;
pub use recommendation_service::RecommendationService;
