use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

/// At most this many weak topics are surfaced to the dashboard.
const WEAK_TOPIC_DISPLAY_LIMIT: usize = 3;

#[get("/analytics/weak-topics")]
async fn weak_topics(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let weak = state
        .analytics
        .weak_topics(auth.user_id(), Some(WEAK_TOPIC_DISPLAY_LIMIT))
        .await?;
    Ok(HttpResponse::Ok().json(weak))
}

#[get("/analytics/performance-by-subject")]
async fn performance_by_subject(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let performance = state.analytics.performance_by_subject(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(performance))
}

#[get("/analytics/progress-over-time")]
async fn progress_over_time(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let progress = state.analytics.progress_over_time(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(progress))
}
