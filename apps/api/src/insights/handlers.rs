//! Axum route handlers for the Insights API.
//!
//! AI failures are reported inside the envelope, never as HTTP errors: a
//! failed task still answers 200 with the empty result shape.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::insights::interview::{generate_interview_questions, InterviewQuestions};
use crate::insights::models::{JobSummary, ProfileContext};
use crate::insights::outcome::{TaskOutcome, TaskState};
use crate::insights::profile_optimizer::{
    optimize_profile, ProfileOptimization, DEFAULT_TARGET_ROLE,
};
use crate::insights::recommendations::{generate_job_recommendations, JobRecommendations};
use crate::insights::skill_gaps::{generate_skill_gap_analysis, SkillGapAnalysis};
use crate::llm_client::ErrorKind;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightEnvelope<T> {
    pub status: TaskState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    pub result: T,
}

impl<T> From<TaskOutcome<T>> for InsightEnvelope<T> {
    fn from(outcome: TaskOutcome<T>) -> Self {
        Self {
            status: outcome.state(),
            error_kind: outcome.error_kind(),
            result: outcome.into_value(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AiStatusResponse {
    pub available: bool,
    pub model: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    pub profile: Option<ProfileContext>,
    #[serde(default)]
    pub jobs: Vec<JobSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapRequest {
    pub profile: Option<ProfileContext>,
    #[serde(default)]
    pub target_jobs: Vec<JobSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    pub job: Option<JobSummary>,
    pub profile: Option<ProfileContext>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    pub profile: Option<ProfileContext>,
    pub target_role: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/insights/status
///
/// Whether AI features are configured. Views use this to decide whether to
/// offer an AI action at all.
pub async fn handle_ai_status(State(state): State<AppState>) -> Json<AiStatusResponse> {
    Json(AiStatusResponse {
        available: state.completion.is_available(),
        model: state.config.openai_model.clone(),
    })
}

/// POST /api/v1/insights/job-recommendations
pub async fn handle_job_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationsRequest>,
) -> Json<InsightEnvelope<JobRecommendations>> {
    let outcome =
        generate_job_recommendations(&state.completion, request.profile.as_ref(), &request.jobs)
            .await;
    Json(outcome.into())
}

/// POST /api/v1/insights/skill-gaps
pub async fn handle_skill_gaps(
    State(state): State<AppState>,
    Json(request): Json<SkillGapRequest>,
) -> Json<InsightEnvelope<SkillGapAnalysis>> {
    let outcome = generate_skill_gap_analysis(
        &state.completion,
        request.profile.as_ref(),
        &request.target_jobs,
    )
    .await;
    Json(outcome.into())
}

/// POST /api/v1/insights/interview-questions
///
/// Requires a job with a non-blank title; without one there is nothing to
/// prepare for.
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InsightEnvelope<InterviewQuestions>>, AppError> {
    let job = request
        .job
        .filter(|j| !j.title.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job.title cannot be empty".to_string()))?;

    let outcome =
        generate_interview_questions(&state.completion, Some(&job), request.profile.as_ref()).await;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/insights/profile-optimization
pub async fn handle_profile_optimization(
    State(state): State<AppState>,
    Json(request): Json<OptimizationRequest>,
) -> Json<InsightEnvelope<ProfileOptimization>> {
    let target_role = request.target_role.as_deref().unwrap_or(DEFAULT_TARGET_ROLE);
    let outcome = optimize_profile(&state.completion, request.profile.as_ref(), target_role).await;
    Json(outcome.into())
}
