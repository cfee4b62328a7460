//! Axum route handlers for the Dashboard API.
//!
//! Each handler starts from fallback data and only asks the model when AI is
//! configured and the caller supplied a profile.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::dashboard::fallback;
use crate::dashboard::merge::{
    choose_skill_gaps, merge_recommendations, DisplaySkillGap, JobListing, ResultSlot,
};
use crate::insights::models::{JobSummary, ProfileContext};
use crate::insights::outcome::TaskState;
use crate::insights::recommendations::generate_job_recommendations;
use crate::insights::skill_gaps::{generate_skill_gap_analysis, SkillGap};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendedJobsRequest {
    pub profile: Option<ProfileContext>,
    pub jobs: Vec<JobListing>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedJobsResponse {
    pub jobs: Vec<JobListing>,
    pub ai_status: TaskState,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGapsRequest {
    pub profile: Option<ProfileContext>,
    pub target_jobs: Vec<JobSummary>,
    pub skill_gaps: Vec<SkillGap>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapsResponse {
    pub skill_gaps: Vec<DisplaySkillGap>,
    pub ai_status: TaskState,
}

#[derive(Debug, Serialize)]
pub struct InterviewJobsResponse {
    pub jobs: Vec<JobSummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/dashboard/recommended-jobs
///
/// Ranks the caller's listings (or the fallback listings) with AI and merges
/// the scores in. Without AI the listings come back as-is.
pub async fn handle_recommended_jobs(
    State(state): State<AppState>,
    Json(request): Json<RecommendedJobsRequest>,
) -> Json<RecommendedJobsResponse> {
    let listings = if request.jobs.is_empty() {
        fallback::recommended_jobs()
    } else {
        request.jobs
    };
    let mut slot = ResultSlot::new(listings.clone());

    if let Some(profile) = request.profile.as_ref().filter(|_| state.completion.is_available()) {
        let ticket = slot.begin();
        let summaries: Vec<JobSummary> = listings.iter().map(JobListing::summary).collect();
        let outcome = generate_job_recommendations(&state.completion, Some(profile), &summaries)
            .await
            .map(|recs| merge_recommendations(listings, &recs.recommendations));
        slot.settle(ticket, outcome);
    }

    let ai_status = slot.state();
    Json(RecommendedJobsResponse {
        jobs: slot.into_display(),
        ai_status,
    })
}

/// POST /api/v1/dashboard/skill-gaps
///
/// AI gaps win over caller-provided gaps, which win over the fallback set.
pub async fn handle_skill_gaps(
    State(state): State<AppState>,
    Json(request): Json<SkillGapsRequest>,
) -> Json<SkillGapsResponse> {
    let fallback_gaps = fallback::skill_gaps();
    let mut slot = ResultSlot::new(choose_skill_gaps(&[], &request.skill_gaps, &fallback_gaps));

    if let Some(profile) = request.profile.as_ref().filter(|_| state.completion.is_available()) {
        let ticket = slot.begin();
        let outcome =
            generate_skill_gap_analysis(&state.completion, Some(profile), &request.target_jobs)
                .await
                .map(|analysis| {
                    choose_skill_gaps(&analysis.skill_gaps, &request.skill_gaps, &fallback_gaps)
                });
        slot.settle(ticket, outcome);
    }

    let ai_status = slot.state();
    Json(SkillGapsResponse {
        skill_gaps: slot.into_display(),
        ai_status,
    })
}

/// GET /api/v1/dashboard/interview-jobs
pub async fn handle_interview_jobs() -> Json<InterviewJobsResponse> {
    Json(InterviewJobsResponse {
        jobs: fallback::interview_jobs(),
    })
}
