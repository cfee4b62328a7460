//! Interview question generation for one selected job.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::insights::models::{JobSummary, ProfileContext, TaskKind};
use crate::insights::outcome::TaskOutcome;
use crate::insights::prompts::{build_prompt, PromptContext};
use crate::llm_client::{CompletionClient, CompletionRequest, SchemaDescriptor};

pub const MAX_QUESTIONS: usize = 5;

pub fn interview_schema() -> &'static SchemaDescriptor {
    static SCHEMA: OnceLock<SchemaDescriptor> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        SchemaDescriptor::new(
            "interview_questions",
            json!({
                "type": "object",
                "properties": {
                    "questions": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "question": { "type": "string" },
                                "category": { "type": "string" },
                                "difficulty": { "type": "string", "enum": ["easy", "medium", "hard"] }
                            },
                            "required": ["question", "category", "difficulty"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["questions"],
                "additionalProperties": false
            }),
        )
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    /// Free-form label, e.g. "technical" or "behavioral".
    pub category: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestions {
    pub questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Deserialize)]
struct QuestionsPayload {
    questions: Vec<InterviewQuestion>,
}

pub async fn generate_interview_questions(
    client: &CompletionClient,
    job: Option<&JobSummary>,
    profile: Option<&ProfileContext>,
) -> TaskOutcome<InterviewQuestions> {
    let job = job.map(JobSummary::normalized);
    let profile = profile.map(ProfileContext::normalized);

    let prompt = build_prompt(PromptContext::InterviewQuestions {
        job: job.as_ref(),
        profile: profile.as_ref(),
    });
    let request = CompletionRequest {
        system_instruction: prompt.system,
        user_prompt: prompt.user,
        response_schema: interview_schema(),
    };

    let result = client.complete::<QuestionsPayload>(&request).await;
    TaskOutcome::settle(TaskKind::InterviewQuestions, result, reshape)
}

fn reshape(payload: QuestionsPayload) -> InterviewQuestions {
    let questions = payload
        .questions
        .into_iter()
        .filter_map(|q| {
            let question = q.question.trim();
            if question.is_empty() {
                return None;
            }
            let category = match q.category.trim() {
                "" => "general".to_string(),
                c => c.to_lowercase(),
            };
            Some(InterviewQuestion {
                question: question.to_string(),
                category,
                difficulty: q.difficulty,
            })
        })
        .take(MAX_QUESTIONS)
        .collect();

    InterviewQuestions { questions }
}
