use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::NewTestResult,
        dto::{
            GenerateTestRequest, QuestionWithOrder, SubjectFilter, SubmitTestResultRequest,
            TestDetailResponse, TestResultWithTest,
        },
    },
};

/// Runs the full generation pipeline and returns the created test.
#[post("/generate-test")]
async fn generate_test(
    state: web::Data<AppState>,
    request: web::Json<GenerateTestRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state.rag.generate_test(auth.user_id(), request).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/tests")]
async fn list_tests(
    state: web::Data<AppState>,
    filter: web::Query<SubjectFilter>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let tests = state.tests.find_all(filter.subject_id).await?;
    Ok(HttpResponse::Ok().json(tests))
}

/// A test with its questions in presentation order.
#[get("/tests/{id}")]
async fn get_test(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let test = state
        .tests
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test {}", id)))?;

    let join_rows = state.tests.get_test_questions(id).await?;
    let question_ids: Vec<i32> = join_rows.iter().map(|row| row.question_id).collect();
    let questions = state.tests.find_questions_by_ids(&question_ids).await?;

    // Join rows arrive ordered; look each question up by id to keep that order.
    let ordered: Vec<QuestionWithOrder> = join_rows
        .iter()
        .filter_map(|row| {
            questions
                .iter()
                .find(|q| q.id == row.question_id)
                .map(|question| QuestionWithOrder {
                    question: question.clone(),
                    order: row.order,
                })
        })
        .collect();

    Ok(HttpResponse::Ok().json(TestDetailResponse {
        test,
        questions: ordered,
    }))
}

#[post("/test-results")]
async fn submit_test_result(
    state: web::Data<AppState>,
    request: web::Json<SubmitTestResultRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    if request.score > request.max_score {
        return Err(AppError::ValidationError(
            "Score cannot exceed maximum score".to_string(),
        ));
    }

    state
        .tests
        .find_by_id(request.test_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test {}", request.test_id)))?;

    let result = state
        .results
        .create(NewTestResult {
            user_id: auth.user_id(),
            test_id: request.test_id,
            score: request.score,
            max_score: request.max_score,
            time_taken_seconds: request.time_taken_seconds,
            completed: true,
            answers: request.answers,
        })
        .await?;

    Ok(HttpResponse::Created().json(result))
}

/// The caller's results, most recent first, each with its test attached.
#[get("/test-results")]
async fn list_test_results(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let results = state.results.find_by_user(auth.user_id()).await?;

    let mut enriched = Vec::with_capacity(results.len());
    for result in results {
        let test = state.tests.find_by_id(result.test_id).await?;
        enriched.push(TestResultWithTest { result, test });
    }

    Ok(HttpResponse::Ok().json(enriched))
}
