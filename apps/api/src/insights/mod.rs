// AI insights: prompt builders, the four task adapters and their HTTP handlers.
// Every model call goes through llm_client; adapters never fail outward, they
// settle to the empty shape of their output type.

pub mod handlers;
pub mod interview;
pub mod models;
pub mod outcome;
pub mod profile_optimizer;
pub mod prompts;
pub mod recommendations;
pub mod skill_gaps;

pub use interview::{generate_interview_questions, InterviewQuestions};
pub use models::{JobSummary, ProfileContext, TaskKind};
pub use outcome::{TaskOutcome, TaskState};
pub use profile_optimizer::{optimize_profile, ProfileOptimization};
pub use recommendations::{generate_job_recommendations, JobRecommendations};
pub use skill_gaps::{generate_skill_gap_analysis, SkillGapAnalysis};
