//! Job recommendations: ranks candidate jobs against a profile.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::insights::models::{clamp_percent, unique_trimmed, JobSummary, ProfileContext, TaskKind};
use crate::insights::outcome::TaskOutcome;
use crate::insights::prompts::{build_prompt, PromptContext};
use crate::llm_client::{CompletionClient, CompletionRequest, SchemaDescriptor};

pub const MAX_RECOMMENDATIONS: usize = 5;

pub fn recommendations_schema() -> &'static SchemaDescriptor {
    static SCHEMA: OnceLock<SchemaDescriptor> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        SchemaDescriptor::new(
            "job_recommendations",
            json!({
                "type": "object",
                "properties": {
                    "recommendations": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "jobId": { "type": "string" },
                                "matchScore": { "type": "number" },
                                "reasons": { "type": "array", "items": { "type": "string" } }
                            },
                            "required": ["jobId", "matchScore", "reasons"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["recommendations"],
                "additionalProperties": false
            }),
        )
    })
}

#[derive(Debug, Deserialize)]
struct RecommendationsPayload {
    recommendations: Vec<RawRecommendation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecommendation {
    job_id: String,
    match_score: f64,
    reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecommendation {
    pub job_id: String,
    /// 0 – 100
    pub match_score: u8,
    /// Never empty.
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecommendations {
    pub recommendations: Vec<JobRecommendation>,
}

/// Asks the model to rank `jobs` for `profile`.
///
/// Only recommendations naming one of the supplied job ids survive, in the
/// model's order, capped at `MAX_RECOMMENDATIONS`.
pub async fn generate_job_recommendations(
    client: &CompletionClient,
    profile: Option<&ProfileContext>,
    jobs: &[JobSummary],
) -> TaskOutcome<JobRecommendations> {
    let profile = profile.map(ProfileContext::normalized);
    let jobs: Vec<JobSummary> = jobs.iter().map(JobSummary::normalized).collect();

    let prompt = build_prompt(PromptContext::JobRecommendations {
        profile: profile.as_ref(),
        jobs: &jobs,
    });
    let request = CompletionRequest {
        system_instruction: prompt.system,
        user_prompt: prompt.user,
        response_schema: recommendations_schema(),
    };

    let result = client.complete::<RecommendationsPayload>(&request).await;
    let outcome = TaskOutcome::settle(TaskKind::JobRecommendations, result, |payload| {
        reshape(payload, &jobs)
    });

    if let TaskOutcome::Succeeded(recs) = &outcome {
        info!(
            "AI recommended {} of {} jobs",
            recs.recommendations.len(),
            jobs.len()
        );
    }
    outcome
}

fn reshape(payload: RecommendationsPayload, jobs: &[JobSummary]) -> JobRecommendations {
    let known: HashSet<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
    let mut seen = HashSet::new();

    let recommendations = payload
        .recommendations
        .into_iter()
        .filter_map(|raw| {
            let job_id = raw.job_id.trim().to_string();
            if !known.contains(job_id.as_str()) {
                debug!("dropping recommendation for unknown job id {job_id:?}");
                return None;
            }
            if !seen.insert(job_id.clone()) {
                return None;
            }
            let reasons = unique_trimmed(&raw.reasons);
            if reasons.is_empty() {
                debug!("dropping recommendation for {job_id} with no reasons");
                return None;
            }
            Some(JobRecommendation {
                job_id,
                match_score: clamp_percent(raw.match_score),
                reasons,
            })
        })
        .take(MAX_RECOMMENDATIONS)
        .collect();

    JobRecommendations { recommendations }
}
