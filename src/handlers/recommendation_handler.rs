use actix_web::{get, post, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

#[get("/recommendations")]
async fn list_recommendations(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let recommendations = state.recommendations.list_for_user(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(recommendations))
}

/// Recomputes weak topics and persists fresh recommendations for the caller.
#[post("/generate-recommendations")]
async fn generate_recommendations(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let created = state
        .recommendations
        .generate_for_user(auth.user_id())
        .await?;
    Ok(HttpResponse::Created().json(created))
}
