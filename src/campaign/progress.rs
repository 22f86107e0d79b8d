//! Progress reporting for campaigns
//!
//! Defines the `CampaignEvent` stream and the `ProgressReporter` trait the
//! state machine reports through. Events mirror the campaign's log lines in
//! a structured, serializable form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::types::CampaignReport;

/// Event types emitted while a campaign runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CampaignEvent {
    /// Emitted once before terms are sourced
    Started {
        label: String,
        target: usize,
        baseline: u64,
        timestamp: DateTime<Utc>,
    },
    /// Emitted before each primary term is searched
    Iteration {
        /// 1-based position within the sourced batch
        index: usize,
        candidates: usize,
        progress: usize,
        target: usize,
        term: String,
        signal: u64,
        timestamp: DateTime<Utc>,
    },
    /// Emitted before each related-term fallback search
    Fallback {
        attempt: usize,
        max: usize,
        term: String,
        signal: u64,
        timestamp: DateTime<Utc>,
    },
    /// A term left the signal unchanged
    NoGain {
        term: String,
        signal: u64,
        timestamp: DateTime<Utc>,
    },
    /// A reading dropped below the baseline
    Regression {
        term: String,
        signal: u64,
        baseline: u64,
        timestamp: DateTime<Utc>,
    },
    /// Campaign finished (target met, terms exhausted or aborted)
    Finished {
        report: CampaignReport,
        timestamp: DateTime<Utc>,
    },
}

/// Receives campaign events
///
/// Implementations can forward to channels, UIs or metrics. Called inline
/// from the campaign loop, so implementations must not block.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: CampaignEvent);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report(&self, _event: CampaignEvent) {}
}

/// Forwards events into an unbounded channel
///
/// Send failures (receiver dropped) are ignored; observers are optional.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<CampaignEvent>,
}

impl ChannelProgress {
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<CampaignEvent>) -> Self {
        Self { tx }
    }

    /// Reporter plus the receiving end of its channel
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<CampaignEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressReporter for ChannelProgress {
    fn report(&self, event: CampaignEvent) {
        let _ = self.tx.send(event);
    }
}
