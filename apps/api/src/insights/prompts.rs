//! Prompt builders: one per task kind.
//!
//! Pure functions of their input: no clock, no randomness, no shared state.
//! Absent or blank context is replaced with an explicit placeholder.

use crate::insights::models::{JobSummary, ProfileContext, TaskKind};
use crate::llm_client::prompts::{
    fill_template, join_or_placeholder, or_placeholder, system_instruction,
};

pub const RECOMMENDATIONS_ROLE: &str =
    "You are an AI career advisor that provides personalized job recommendations.";
pub const SKILL_GAP_ROLE: &str =
    "You are an AI career advisor specializing in skill gap analysis and learning recommendations.";
pub const INTERVIEW_ROLE: &str =
    "You are an experienced HR professional creating personalized interview questions.";
pub const OPTIMIZATION_ROLE: &str =
    "You are a professional career coach specializing in profile optimization.";

const NOT_SPECIFIED: &str = "Not specified";
const ENTRY_LEVEL: &str = "Entry level";

/// Replace: {skills}, {experience}, {education}, {preferences}, {jobs}
pub const RECOMMENDATIONS_TEMPLATE: &str = r#"Based on this user profile:
Skills: {skills}
Experience: {experience}
Education: {education}
Preferences: {preferences}

Recommend the top 5 most suitable jobs from this list and calculate match scores (0-100):
{jobs}

Use the id shown in brackets as the jobId. Respond in this JSON format:
{
  "recommendations": [
    {
      "jobId": "job_id_here",
      "matchScore": 85,
      "reasons": ["reason1", "reason2"]
    }
  ]
}"#;

/// Replace: {skills}, {career_goal}, {experience}, {target_jobs}
pub const SKILL_GAP_TEMPLATE: &str = r#"Analyze skill gaps for this user profile:
Current Skills: {skills}
Career Goal: {career_goal}
Experience Level: {experience}

Target Jobs: {target_jobs}

Identify top 3 skill gaps and provide learning recommendations. Respond in this JSON format:
{
  "skillGaps": [
    {
      "skill": "React Native",
      "priority": "high",
      "demandScore": 85,
      "currentLevel": 0,
      "targetLevel": 70,
      "jobsRequiring": 23,
      "averageSalaryIncrease": "$8,000",
      "timeToLearn": "3-4 months",
      "description": "Mobile app development framework highly sought after",
      "recommendedCourses": [
        {
          "title": "React Native - The Practical Guide",
          "provider": "Udemy",
          "rating": 4.6,
          "duration": "32 hours",
          "price": "$89.99"
        }
      ]
    }
  ]
}

priority is one of "high", "medium", "low"."#;

/// Replace: {title}, {company}, {job_skills}, {experience}, {skills}
pub const INTERVIEW_TEMPLATE: &str = r#"Generate 5 personalized interview questions for:
Job: {title} at {company}
Required Skills: {job_skills}
User Background: {experience} with skills in {skills}

Focus on both technical and behavioral questions relevant to this specific role.

Respond in this JSON format:
{
  "questions": [
    {
      "question": "Walk me through a component you built with React.",
      "category": "technical",
      "difficulty": "medium"
    }
  ]
}

difficulty is one of "easy", "medium", "hard". category is a short label such as "technical", "behavioral", "situational" or "problem-solving"."#;

/// Replace: {target_role}, {summary}, {skills}, {experience}
pub const OPTIMIZATION_TEMPLATE: &str = r#"Optimize this profile for a {target_role} position:
Current Summary: {summary}
Skills: {skills}
Experience: {experience}

Provide optimization suggestions for summary, skills emphasis, and missing elements.

Respond in this JSON format:
{
  "optimizedSummary": "Rewritten profile summary",
  "skillsToEmphasize": ["skill"],
  "missingSkills": ["skill"],
  "suggestions": ["suggestion"]
}"#;

/// A fully built prompt: system instruction plus user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPrompt {
    pub system: String,
    pub user: String,
}

/// The context each task kind is built from.
#[derive(Debug, Clone, Copy)]
pub enum PromptContext<'a> {
    JobRecommendations {
        profile: Option<&'a ProfileContext>,
        jobs: &'a [JobSummary],
    },
    SkillGapAnalysis {
        profile: Option<&'a ProfileContext>,
        target_jobs: &'a [JobSummary],
    },
    InterviewQuestions {
        job: Option<&'a JobSummary>,
        profile: Option<&'a ProfileContext>,
    },
    ProfileOptimization {
        profile: Option<&'a ProfileContext>,
        target_role: &'a str,
    },
}

impl PromptContext<'_> {
    pub fn task(&self) -> TaskKind {
        match self {
            PromptContext::JobRecommendations { .. } => TaskKind::JobRecommendations,
            PromptContext::SkillGapAnalysis { .. } => TaskKind::SkillGapAnalysis,
            PromptContext::InterviewQuestions { .. } => TaskKind::InterviewQuestions,
            PromptContext::ProfileOptimization { .. } => TaskKind::ProfileOptimization,
        }
    }
}

pub fn system_role(task: TaskKind) -> &'static str {
    match task {
        TaskKind::JobRecommendations => RECOMMENDATIONS_ROLE,
        TaskKind::SkillGapAnalysis => SKILL_GAP_ROLE,
        TaskKind::InterviewQuestions => INTERVIEW_ROLE,
        TaskKind::ProfileOptimization => OPTIMIZATION_ROLE,
    }
}

/// Builds the prompt for one (task kind, context) pair.
pub fn build_prompt(context: PromptContext<'_>) -> TaskPrompt {
    let user = match context {
        PromptContext::JobRecommendations { profile, jobs } => recommendations_user(profile, jobs),
        PromptContext::SkillGapAnalysis {
            profile,
            target_jobs,
        } => skill_gap_user(profile, target_jobs),
        PromptContext::InterviewQuestions { job, profile } => interview_user(job, profile),
        PromptContext::ProfileOptimization {
            profile,
            target_role,
        } => optimization_user(profile, target_role),
    };

    TaskPrompt {
        system: system_instruction(system_role(context.task())),
        user,
    }
}

fn recommendations_user(profile: Option<&ProfileContext>, jobs: &[JobSummary]) -> String {
    let skills = skills_or(profile, NOT_SPECIFIED);
    let jobs_block = if jobs.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        jobs.iter().map(job_line).collect::<Vec<_>>().join("\n")
    };

    fill_template(
        RECOMMENDATIONS_TEMPLATE,
        &[
            ("skills", skills.as_str()),
            ("experience", field(profile, |p| &p.experience_level, ENTRY_LEVEL)),
            ("education", field(profile, |p| &p.education, NOT_SPECIFIED)),
            (
                "preferences",
                field(profile, |p| &p.preferences, "Open to opportunities"),
            ),
            ("jobs", jobs_block.as_str()),
        ],
    )
}

fn skill_gap_user(profile: Option<&ProfileContext>, target_jobs: &[JobSummary]) -> String {
    let skills = skills_or(profile, "None specified");
    let titles: Vec<&str> = target_jobs.iter().map(|j| j.title.as_str()).collect();
    let target_jobs = join_or_placeholder(&titles, NOT_SPECIFIED);

    fill_template(
        SKILL_GAP_TEMPLATE,
        &[
            ("skills", skills.as_str()),
            (
                "career_goal",
                field(profile, |p| &p.career_goal, "Software Development"),
            ),
            ("experience", field(profile, |p| &p.experience_level, ENTRY_LEVEL)),
            ("target_jobs", target_jobs.as_str()),
        ],
    )
}

fn interview_user(job: Option<&JobSummary>, profile: Option<&ProfileContext>) -> String {
    let job_skills = job
        .map(|j| join_or_placeholder(&j.skills, NOT_SPECIFIED))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let skills = skills_or(profile, "various technologies");

    fill_template(
        INTERVIEW_TEMPLATE,
        &[
            ("title", or_placeholder(job.map(|j| j.title.as_str()), NOT_SPECIFIED)),
            (
                "company",
                or_placeholder(job.map(|j| j.company.as_str()), NOT_SPECIFIED),
            ),
            ("job_skills", job_skills.as_str()),
            ("experience", field(profile, |p| &p.experience_level, ENTRY_LEVEL)),
            ("skills", skills.as_str()),
        ],
    )
}

fn optimization_user(profile: Option<&ProfileContext>, target_role: &str) -> String {
    let skills = skills_or(profile, NOT_SPECIFIED);
    let summary = or_placeholder(profile.and_then(|p| p.summary.as_deref()), "Not provided");

    fill_template(
        OPTIMIZATION_TEMPLATE,
        &[
            ("target_role", or_placeholder(Some(target_role), NOT_SPECIFIED)),
            ("summary", summary),
            ("skills", skills.as_str()),
            ("experience", field(profile, |p| &p.experience_level, ENTRY_LEVEL)),
        ],
    )
}

fn job_line(job: &JobSummary) -> String {
    format!(
        "- [{}] {} at {} - {}",
        or_placeholder(Some(job.id.as_str()), NOT_SPECIFIED),
        or_placeholder(Some(job.title.as_str()), NOT_SPECIFIED),
        or_placeholder(Some(job.company.as_str()), NOT_SPECIFIED),
        join_or_placeholder(&job.skills, NOT_SPECIFIED),
    )
}

fn skills_or(profile: Option<&ProfileContext>, placeholder: &str) -> String {
    profile
        .map(|p| join_or_placeholder(&p.skills, placeholder))
        .unwrap_or_else(|| placeholder.to_string())
}

fn field<'a>(
    profile: Option<&'a ProfileContext>,
    get: impl Fn(&'a ProfileContext) -> &'a String,
    placeholder: &'a str,
) -> &'a str {
    or_placeholder(profile.map(|p| get(p).as_str()), placeholder)
}
