use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::app_state::AppState;

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[get("/health/live")]
async fn health_live() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "alive" }))
}

/// Readiness includes a storage ping when a database is wired in.
#[get("/health/ready")]
async fn health_ready(state: web::Data<AppState>) -> HttpResponse {
    match &state.db {
        Some(db) => match db.health_check().await {
            Ok(()) => HttpResponse::Ok().json(json!({ "status": "ready" })),
            Err(err) => {
                log::error!("Readiness check failed: {}", err);
                HttpResponse::ServiceUnavailable().json(json!({
                    "status": "unavailable",
                    "reason": "database unreachable"
                }))
            }
        },
        None => HttpResponse::Ok().json(json!({ "status": "ready" })),
    }
}
