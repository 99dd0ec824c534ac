pub mod analytics_handler;
pub mod health_handler;
pub mod recommendation_handler;
pub mod subject_handler;
pub mod test_handler;

use actix_web::web;

/// Routes behind authentication, mounted under `/api`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(subject_handler::list_subjects)
        .service(subject_handler::get_subject)
        .service(subject_handler::list_topics)
        .service(test_handler::generate_test)
        .service(test_handler::list_tests)
        .service(test_handler::get_test)
        .service(test_handler::submit_test_result)
        .service(test_handler::list_test_results)
        .service(analytics_handler::weak_topics)
        .service(analytics_handler::performance_by_subject)
        .service(analytics_handler::progress_over_time)
        .service(recommendation_handler::list_recommendations)
        .service(recommendation_handler::generate_recommendations);
}

/// Unauthenticated health endpoints, mounted at the root.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::health)
        .service(health_handler::health_live)
        .service(health_handler::health_ready);
}
