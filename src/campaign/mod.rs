//! Search-and-retry campaigns
//!
//! Drives a session through a target number of reward-increasing searches,
//! with related-term fallbacks for ineffective terms and an escalating retry
//! ladder for session timeouts.

pub mod engine;
pub mod evaluate;
pub mod pacing;
pub mod progress;
pub mod types;

pub use engine::SearchCampaign;
pub use evaluate::{EvaluationOutcome, SearchEvaluator, TimeoutEscalation};
pub use pacing::{HumanPacer, NoDelay, Pacer};
pub use progress::{CampaignEvent, ChannelProgress, NoOpProgress, ProgressReporter};
pub use types::{CampaignError, CampaignReport, Termination};
