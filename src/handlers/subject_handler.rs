use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::SubjectFilter,
};

#[get("/subjects")]
async fn list_subjects(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let subjects = state.subjects.find_all().await?;
    Ok(HttpResponse::Ok().json(subjects))
}

#[get("/subjects/{id}")]
async fn get_subject(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let subject = state
        .subjects
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subject {}", id)))?;
    Ok(HttpResponse::Ok().json(subject))
}

/// Topics, optionally narrowed with `?subjectId=`.
#[get("/topics")]
async fn list_topics(
    state: web::Data<AppState>,
    filter: web::Query<SubjectFilter>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let topics = state.topics.find_all(filter.subject_id).await?;
    Ok(HttpResponse::Ok().json(topics))
}
