pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers as dashboard;
use crate::insights::handlers as insights;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Insights API
        .route("/api/v1/insights/status", get(insights::handle_ai_status))
        .route(
            "/api/v1/insights/job-recommendations",
            post(insights::handle_job_recommendations),
        )
        .route("/api/v1/insights/skill-gaps", post(insights::handle_skill_gaps))
        .route(
            "/api/v1/insights/interview-questions",
            post(insights::handle_interview_questions),
        )
        .route(
            "/api/v1/insights/profile-optimization",
            post(insights::handle_profile_optimization),
        )
        // Dashboard API
        .route(
            "/api/v1/dashboard/recommended-jobs",
            post(dashboard::handle_recommended_jobs),
        )
        .route("/api/v1/dashboard/skill-gaps", post(dashboard::handle_skill_gaps))
        .route(
            "/api/v1/dashboard/interview-jobs",
            get(dashboard::handle_interview_jobs),
        )
        .with_state(state)
}
