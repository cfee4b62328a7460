//! Skill-gap analysis: top gaps between a profile and its target jobs, with
//! course suggestions.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::insights::models::{clamp_percent, JobSummary, ProfileContext, TaskKind};
use crate::insights::outcome::TaskOutcome;
use crate::insights::prompts::{build_prompt, PromptContext};
use crate::llm_client::{CompletionClient, CompletionRequest, SchemaDescriptor};

pub const MAX_SKILL_GAPS: usize = 3;

pub fn skill_gap_schema() -> &'static SchemaDescriptor {
    static SCHEMA: OnceLock<SchemaDescriptor> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        SchemaDescriptor::new(
            "skill_gap_analysis",
            json!({
                "type": "object",
                "properties": {
                    "skillGaps": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "skill": { "type": "string" },
                                "priority": { "type": "string", "enum": ["high", "medium", "low"] },
                                "demandScore": { "type": "number" },
                                "currentLevel": { "type": "number" },
                                "targetLevel": { "type": "number" },
                                "jobsRequiring": { "type": "number" },
                                "averageSalaryIncrease": { "type": "string" },
                                "timeToLearn": { "type": "string" },
                                "description": { "type": "string" },
                                "recommendedCourses": {
                                    "type": "array",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "title": { "type": "string" },
                                            "provider": { "type": "string" },
                                            "rating": { "type": "number" },
                                            "duration": { "type": "string" },
                                            "price": { "type": "string" }
                                        },
                                        "required": ["title", "provider", "rating", "duration", "price"],
                                        "additionalProperties": false
                                    }
                                }
                            },
                            "required": [
                                "skill", "priority", "demandScore", "currentLevel", "targetLevel",
                                "jobsRequiring", "averageSalaryIncrease", "timeToLearn",
                                "description", "recommendedCourses"
                            ],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["skillGaps"],
                "additionalProperties": false
            }),
        )
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub provider: String,
    /// 0.0 – 5.0
    pub rating: f32,
    pub duration: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    /// Stable per-position id (`ai_1`, `ai_2`, …); the model does not supply one.
    pub id: String,
    pub skill: String,
    pub priority: Priority,
    pub demand_score: u8,
    pub current_level: u8,
    /// Conventionally ≥ current_level; not enforced.
    pub target_level: u8,
    pub jobs_requiring: u32,
    pub average_salary_increase: String,
    pub time_to_learn: String,
    pub description: String,
    pub recommended_courses: Vec<Course>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapAnalysis {
    pub skill_gaps: Vec<SkillGap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkillGapPayload {
    skill_gaps: Vec<RawSkillGap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSkillGap {
    skill: String,
    priority: Priority,
    demand_score: f64,
    current_level: f64,
    target_level: f64,
    jobs_requiring: f64,
    average_salary_increase: String,
    time_to_learn: String,
    description: String,
    recommended_courses: Vec<RawCourse>,
}

#[derive(Debug, Deserialize)]
struct RawCourse {
    title: String,
    provider: String,
    rating: f64,
    duration: String,
    price: String,
}

pub async fn generate_skill_gap_analysis(
    client: &CompletionClient,
    profile: Option<&ProfileContext>,
    target_jobs: &[JobSummary],
) -> TaskOutcome<SkillGapAnalysis> {
    let profile = profile.map(ProfileContext::normalized);
    let target_jobs: Vec<JobSummary> = target_jobs.iter().map(JobSummary::normalized).collect();

    let prompt = build_prompt(PromptContext::SkillGapAnalysis {
        profile: profile.as_ref(),
        target_jobs: &target_jobs,
    });
    let request = CompletionRequest {
        system_instruction: prompt.system,
        user_prompt: prompt.user,
        response_schema: skill_gap_schema(),
    };

    let result = client.complete::<SkillGapPayload>(&request).await;
    TaskOutcome::settle(TaskKind::SkillGapAnalysis, result, reshape)
}

fn reshape(payload: SkillGapPayload) -> SkillGapAnalysis {
    let skill_gaps = payload
        .skill_gaps
        .into_iter()
        .take(MAX_SKILL_GAPS)
        .enumerate()
        .map(|(i, raw)| SkillGap {
            id: format!("ai_{}", i + 1),
            skill: raw.skill.trim().to_string(),
            priority: raw.priority,
            demand_score: clamp_percent(raw.demand_score),
            current_level: clamp_percent(raw.current_level),
            target_level: clamp_percent(raw.target_level),
            jobs_requiring: non_negative_count(raw.jobs_requiring),
            average_salary_increase: raw.average_salary_increase,
            time_to_learn: raw.time_to_learn,
            description: raw.description,
            recommended_courses: raw
                .recommended_courses
                .into_iter()
                .map(|c| Course {
                    title: c.title,
                    provider: c.provider,
                    rating: clamp_rating(c.rating),
                    duration: c.duration,
                    price: c.price,
                })
                .collect(),
        })
        .collect();

    SkillGapAnalysis { skill_gaps }
}

fn non_negative_count(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.round().min(u32::MAX as f64) as u32
    }
}

fn clamp_rating(value: f64) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 5.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::test_support::{client_with, StubTransport};
    use crate::llm_client::ErrorKind;

    fn gap_json(skill: &str) -> serde_json::Value {
        json!({
            "skill": skill,
            "priority": "high",
            "demandScore": 85,
            "currentLevel": 0,
            "targetLevel": 70,
            "jobsRequiring": 23,
            "averageSalaryIncrease": "$8,000",
            "timeToLearn": "3-4 months",
            "description": "Mobile app development framework",
            "recommendedCourses": [{
                "title": "React Native - The Practical Guide",
                "provider": "Udemy",
                "rating": 4.6,
                "duration": "32 hours",
                "price": "$89.99"
            }]
        })
    }

    #[test]
    fn test_schema_is_closed() {
        assert!(skill_gap_schema().open_objects().is_empty());
    }

    #[test]
    fn test_prompt_mentions_every_required_field() {
        for field in [
            "skillGaps",
            "priority",
            "demandScore",
            "currentLevel",
            "targetLevel",
            "jobsRequiring",
            "averageSalaryIncrease",
            "timeToLearn",
            "description",
            "recommendedCourses",
            "provider",
            "rating",
            "duration",
            "price",
        ] {
            assert!(crate::insights::prompts::SKILL_GAP_TEMPLATE.contains(field));
        }
    }

    #[tokio::test]
    async fn test_success_attaches_positional_ids() {
        let body = json!({ "skillGaps": [gap_json("React Native"), gap_json("TypeScript")] });
        let client = client_with(StubTransport::replying(body.to_string()));

        let gaps = generate_skill_gap_analysis(&client, None, &[])
            .await
            .into_value()
            .skill_gaps;
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].id, "ai_1");
        assert_eq!(gaps[1].id, "ai_2");
        assert_eq!(gaps[0].skill, "React Native");
        assert_eq!(gaps[0].priority, Priority::High);
        assert_eq!(gaps[0].target_level, 70);
        assert_eq!(gaps[0].jobs_requiring, 23);
        assert_eq!(gaps[0].recommended_courses[0].provider, "Udemy");
    }

    #[tokio::test]
    async fn test_result_is_capped_at_three() {
        let gaps: Vec<serde_json::Value> =
            ["a", "b", "c", "d"].iter().map(|s| gap_json(s)).collect();
        let body = json!({ "skillGaps": gaps });
        let client = client_with(StubTransport::replying(body.to_string()));

        let gaps = generate_skill_gap_analysis(&client, None, &[])
            .await
            .into_value()
            .skill_gaps;
        assert_eq!(gaps.len(), MAX_SKILL_GAPS);
        assert_eq!(gaps[2].skill, "c");
    }

    #[tokio::test]
    async fn test_unknown_priority_is_schema_violation() {
        let mut gap = gap_json("Go");
        gap["priority"] = json!("urgent");
        let body = json!({ "skillGaps": [gap] });
        let client = client_with(StubTransport::replying(body.to_string()));

        let outcome = generate_skill_gap_analysis(&client, None, &[]).await;
        assert_eq!(outcome.error_kind(), Some(ErrorKind::SchemaViolation));
        assert!(outcome.value().skill_gaps.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_numbers_are_clamped() {
        let mut gap = gap_json("Kotlin");
        gap["demandScore"] = json!(180);
        gap["jobsRequiring"] = json!(-4);
        gap["recommendedCourses"][0]["rating"] = json!(7.5);
        let body = json!({ "skillGaps": [gap] });
        let client = client_with(StubTransport::replying(body.to_string()));

        let gaps = generate_skill_gap_analysis(&client, None, &[])
            .await
            .into_value()
            .skill_gaps;
        assert_eq!(gaps[0].demand_score, 100);
        assert_eq!(gaps[0].jobs_requiring, 0);
        assert_eq!(gaps[0].recommended_courses[0].rating, 5.0);
    }

    #[tokio::test]
    async fn test_every_failure_kind_yields_empty_analysis() {
        for kind in [
            ErrorKind::TransportError,
            ErrorKind::AuthError,
            ErrorKind::SchemaViolation,
            ErrorKind::UpstreamError,
        ] {
            let client = client_with(StubTransport::failing(kind));
            let outcome = generate_skill_gap_analysis(&client, None, &[]).await;
            assert_eq!(outcome.error_kind(), Some(kind));
            assert!(outcome.value().skill_gaps.is_empty());
        }
    }

    #[test]
    fn test_skill_gap_serializes_camel_case() {
        let gap = SkillGap {
            id: "ai_1".to_string(),
            skill: "Go".to_string(),
            priority: Priority::Low,
            demand_score: 40,
            current_level: 10,
            target_level: 60,
            jobs_requiring: 4,
            average_salary_increase: "$2,000".to_string(),
            time_to_learn: "1 month".to_string(),
            description: "Systems language".to_string(),
            recommended_courses: vec![],
        };
        let value = serde_json::to_value(&gap).unwrap();
        assert_eq!(value["priority"], "low");
        assert_eq!(value["demandScore"], 40);
        assert_eq!(value["recommendedCourses"], json!([]));
    }
}
