use axum::{
    Router,
    routing::{delete, get, post},
};
use quizbox_db::repositories::{ad_repo::AdRepository, quiz_repo::QuizRepository};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;

use config::ApiConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ApiConfig>,
    pub ads: AdRepository,
    pub quizzes: QuizRepository,
}

impl AppState {
    pub fn new(pool: PgPool, config: ApiConfig) -> Self {
        Self {
            ads: AdRepository::new(pool.clone()),
            quizzes: QuizRepository::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))

        // Ads
        .route("/api/ads", get(handlers::ads::list_ads).post(handlers::ads::create_ad))
        .route("/api/ads/{id}", get(handlers::ads::get_ad).delete(handlers::ads::delete_ad))
        .route("/api/ads/{id}/impression", post(handlers::ads::record_impression))
        .route("/api/ads/{id}/click", post(handlers::ads::record_click))

        // Public quizzes
        .route("/api/quiz", get(handlers::quiz::list_quizzes))
        .route("/api/quiz/{slug}", get(handlers::quiz::get_quiz))
        .route("/api/quiz/{slug}/evaluate", post(handlers::quiz::evaluate_quiz))

        // Quiz administration
        .route(
            "/api/admin/quiz",
            get(handlers::admin::list_all_quizzes).post(handlers::admin::upsert_quiz),
        )
        .route("/api/admin/quiz/{slug}", delete(handlers::admin::delete_quiz))

        // Front-end bundle
        .fallback(handlers::app::serve_frontend)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
