//! Presentation merge: combines AI output with the data a view already has.
//!
//! A view always has something to show. AI results enhance the fallback data
//! when they arrive; a failed or missing AI result leaves the fallback alone.

use serde::{Deserialize, Serialize};

use crate::insights::models::JobSummary;
use crate::insights::outcome::{TaskOutcome, TaskState};
use crate::insights::recommendations::JobRecommendation;
use crate::insights::skill_gaps::SkillGap;

/// At most this many skill gaps are shown on the dashboard card.
pub const DISPLAYED_SKILL_GAPS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub logo: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub salary: String,
    pub match_score: u8,
    pub skills: Vec<String>,
    pub posted_time: String,
    pub is_new: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ai_reasons: Vec<String>,
    #[serde(rename = "isAIRecommended")]
    pub is_ai_recommended: bool,
}

impl JobListing {
    /// The part of a listing the recommendation prompt needs.
    pub fn summary(&self) -> JobSummary {
        JobSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            company: self.company.clone(),
            skills: self.skills.clone(),
        }
    }
}

/// A skill gap as shown on the dashboard, flagged when the model produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySkillGap {
    #[serde(flatten)]
    pub gap: SkillGap,
    #[serde(rename = "isAIGenerated")]
    pub is_ai_generated: bool,
}

/// Applies AI recommendations to `listings`.
///
/// With no recommendations the listings come back untouched, order included.
/// Otherwise matched listings take the AI score and reasons and the whole list
/// is re-sorted by descending score; equal scores keep their relative order.
pub fn merge_recommendations(
    mut listings: Vec<JobListing>,
    recommendations: &[JobRecommendation],
) -> Vec<JobListing> {
    if recommendations.is_empty() {
        return listings;
    }

    for listing in &mut listings {
        if let Some(rec) = recommendations.iter().find(|r| r.job_id == listing.id) {
            listing.match_score = rec.match_score;
            listing.ai_reasons = rec.reasons.clone();
            listing.is_ai_recommended = true;
        }
    }
    listings.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    listings
}

/// Picks the skill gaps to show: AI gaps, else caller-provided gaps, else the
/// fallback set. Capped at `DISPLAYED_SKILL_GAPS`.
pub fn choose_skill_gaps(
    ai: &[SkillGap],
    provided: &[SkillGap],
    fallback: &[SkillGap],
) -> Vec<DisplaySkillGap> {
    let (source, is_ai_generated) = if !ai.is_empty() {
        (ai, true)
    } else if !provided.is_empty() {
        (provided, false)
    } else {
        (fallback, false)
    };

    source
        .iter()
        .take(DISPLAYED_SKILL_GAPS)
        .map(|gap| DisplaySkillGap {
            gap: gap.clone(),
            is_ai_generated,
        })
        .collect()
}

/// Handed out by `ResultSlot::begin`; only the most recent ticket may settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// What one view shows for one AI capability.
///
/// Tracks the call lifecycle (`Idle → Requesting → Succeeded | Failed`) and
/// discards results that arrive after the view moved on: a newer `begin` or a
/// `reset` makes every earlier ticket stale.
#[derive(Debug, Clone)]
pub struct ResultSlot<T> {
    fallback: T,
    ai_value: Option<T>,
    state: TaskState,
    generation: u64,
}

impl<T> ResultSlot<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            fallback,
            ai_value: None,
            state: TaskState::Idle,
            generation: 0,
        }
    }

    pub fn begin(&mut self) -> RequestTicket {
        self.generation += 1;
        self.state = TaskState::Requesting;
        self.ai_value = None;
        RequestTicket(self.generation)
    }

    /// Applies `outcome` if `ticket` is still current. Returns whether it was
    /// applied.
    pub fn settle(&mut self, ticket: RequestTicket, outcome: TaskOutcome<T>) -> bool {
        if ticket.0 != self.generation || self.state != TaskState::Requesting {
            return false;
        }
        match outcome {
            TaskOutcome::Succeeded(value) => {
                self.ai_value = Some(value);
                self.state = TaskState::Succeeded;
            }
            TaskOutcome::Failed { .. } => {
                self.state = TaskState::Failed;
            }
        }
        true
    }

    /// The view was torn down: outstanding requests must not land.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = TaskState::Idle;
        self.ai_value = None;
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == TaskState::Requesting
    }

    pub fn display(&self) -> &T {
        match (&self.ai_value, self.state) {
            (Some(value), TaskState::Succeeded) => value,
            _ => &self.fallback,
        }
    }

    pub fn into_display(self) -> T {
        match (self.ai_value, self.state) {
            (Some(value), TaskState::Succeeded) => value,
            _ => self.fallback,
        }
    }
}
