pub mod question;
pub mod recommendation;
pub mod subject;
pub mod test_result;
pub mod topic;

pub use question::{NewQuestion, Question, QuestionType, TestQuestion};
pub use recommendation::{NewRecommendation, Recommendation};
pub use subject::{NewSubject, Subject};
pub use test::{Difficulty, NewTest, Test};
pub use test_result::{NewTestResult, TestResult};
pub use topic::{NewTopic, Topic};
