//! Campaign results and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::SessionError;
use crate::terms::DataSourceError;

/// Why a campaign stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Termination {
    /// `success_count == target`
    TargetMet,
    /// Sourced terms ran out before the target was met
    TermsExhausted,
    /// A reading dropped below the baseline; the measurement is untrusted
    SignalRegression { observed: u64 },
}

/// Outcome of `SearchCampaign::run`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignReport {
    /// Last trusted reward signal
    pub final_signal: u64,
    /// Searches that strictly increased the signal
    pub success_count: usize,
    pub target: usize,
    /// Primary terms consumed
    pub iterations: usize,
    /// Size of the sourced batch
    pub candidates: usize,
    /// Related-term searches issued
    pub fallbacks: usize,
    pub termination: Termination,
}

impl CampaignReport {
    #[must_use]
    pub fn met_target(&self) -> bool {
        self.termination == Termination::TargetMet
    }

    #[must_use]
    pub fn aborted(&self) -> bool {
        matches!(self.termination, Termination::SignalRegression { .. })
    }
}

/// Failure that ends a campaign without a report
#[derive(Debug, Error)]
pub enum CampaignError {
    /// Terms could not be sourced; nothing was searched
    #[error("Failed to source search terms: {0}")]
    TermSupply(#[from] DataSourceError),

    /// A non-timeout session failure
    #[error("Search session failed: {0}")]
    Session(#[from] SessionError),
}
