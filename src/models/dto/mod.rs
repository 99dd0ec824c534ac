pub mod request;
pub mod response;

pub use request::{GenerateTestRequest, SubjectFilter, SubmitTestResultRequest};
pub use response::{
    GeneratedTestResponse, QuestionWithOrder, TestDetailResponse, TestResultWithTest,
};
