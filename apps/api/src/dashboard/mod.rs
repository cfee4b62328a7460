// Dashboard: fallback data plus the merge rules that fold AI results into it.

pub mod fallback;
pub mod handlers;
pub mod merge;

pub use merge::{choose_skill_gaps, merge_recommendations, JobListing, RequestTicket, ResultSlot};
