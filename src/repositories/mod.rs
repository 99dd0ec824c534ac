pub mod recommendation_repository;
pub mod subject_repository;
pub mod test_repository;
pub mod test_result_repository;
pub mod topic_repository;

pub use recommendation_repository::{MongoRecommendationRepository, RecommendationRepository};
pub use subject_repository::{MongoSubjectRepository, SubjectRepository};
pub use test_repository::{MongoTestRepository, TestRepository};
pub use test_result_repository::{MongoTestResultRepository, TestResultRepository};
pub use topic_repository::{MongoTopicRepository, TopicRepository};
