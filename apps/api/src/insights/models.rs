use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The candidate profile a view hands to the pipeline. Read-only here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileContext {
    /// Unique skill names in display order.
    pub skills: Vec<String>,
    pub experience_level: String,
    pub education: String,
    pub career_goal: String,
    pub preferences: String,
    /// Current free-text profile summary, read by profile optimization.
    pub summary: Option<String>,
}

impl ProfileContext {
    /// Trims skills, drops blanks and removes duplicates keeping the first.
    pub fn normalized(&self) -> Self {
        Self {
            skills: unique_trimmed(&self.skills),
            ..self.clone()
        }
    }
}

/// A job offered as candidate input to recommendation and skill-gap requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub company: String,
    pub skills: Vec<String>,
}

impl JobSummary {
    pub fn normalized(&self) -> Self {
        Self {
            id: self.id.trim().to_string(),
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            skills: unique_trimmed(&self.skills),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    JobRecommendations,
    SkillGapAnalysis,
    InterviewQuestions,
    ProfileOptimization,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::JobRecommendations => "job_recommendations",
            TaskKind::SkillGapAnalysis => "skill_gap_analysis",
            TaskKind::InterviewQuestions => "interview_questions",
            TaskKind::ProfileOptimization => "profile_optimization",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn unique_trimmed(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(String::from)
        .collect()
}

/// Rounds a model-supplied score and clamps it to 0–100.
pub(crate) fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
