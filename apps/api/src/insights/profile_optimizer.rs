//! Profile optimization: rewritten summary plus skill advice for a target role.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::insights::models::{unique_trimmed, ProfileContext, TaskKind};
use crate::insights::outcome::TaskOutcome;
use crate::insights::prompts::{build_prompt, PromptContext};
use crate::llm_client::{CompletionClient, CompletionRequest, SchemaDescriptor};

/// Used when the caller names no target role.
pub const DEFAULT_TARGET_ROLE: &str = "Software Developer";

pub fn optimization_schema() -> &'static SchemaDescriptor {
    static SCHEMA: OnceLock<SchemaDescriptor> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        SchemaDescriptor::new(
            "profile_optimization",
            json!({
                "type": "object",
                "properties": {
                    "optimizedSummary": { "type": "string" },
                    "skillsToEmphasize": { "type": "array", "items": { "type": "string" } },
                    "missingSkills": { "type": "array", "items": { "type": "string" } },
                    "suggestions": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["optimizedSummary", "skillsToEmphasize", "missingSkills", "suggestions"],
                "additionalProperties": false
            }),
        )
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOptimization {
    pub optimized_summary: String,
    pub skills_to_emphasize: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

pub async fn optimize_profile(
    client: &CompletionClient,
    profile: Option<&ProfileContext>,
    target_role: &str,
) -> TaskOutcome<ProfileOptimization> {
    let profile = profile.map(ProfileContext::normalized);
    let target_role = match target_role.trim() {
        "" => DEFAULT_TARGET_ROLE,
        role => role,
    };

    let prompt = build_prompt(PromptContext::ProfileOptimization {
        profile: profile.as_ref(),
        target_role,
    });
    let request = CompletionRequest {
        system_instruction: prompt.system,
        user_prompt: prompt.user,
        response_schema: optimization_schema(),
    };

    let result = client.complete::<ProfileOptimization>(&request).await;
    TaskOutcome::settle(TaskKind::ProfileOptimization, result, |raw| ProfileOptimization {
        optimized_summary: raw.optimized_summary.trim().to_string(),
        skills_to_emphasize: unique_trimmed(&raw.skills_to_emphasize),
        missing_skills: unique_trimmed(&raw.missing_skills),
        suggestions: unique_trimmed(&raw.suggestions),
    })
}
