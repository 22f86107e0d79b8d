//! Single-search evaluation with a timeout retry ladder
//!
//! One attempt submits the term, dwells, scrolls and reads the reward
//! signal. Session timeouts are retried with escalating remediation:
//!
//! | timeouts handled     | tier            | remediation                          |
//! |----------------------|-----------------|--------------------------------------|
//! | other                | `Normal`        | dismiss messages, back off, retry    |
//! | `== proxy_at` (5)    | `EscalateProxy` | new proxy, dismiss, back off, retry  |
//! | `>= give_up_at` (10) | `GiveUp`        | read the signal and return it        |
//!
//! With the default thresholds a term gets at most 11 attempts. Timeouts
//! never escape `evaluate`; other session errors propagate unchanged.

use tracing::{debug, error, info, warn};

use super::pacing::Pacer;
use crate::config::{CampaignConfig, RetryLadderConfig};
use crate::session::{SessionDriver, SessionError};

/// Remediation tier for a timed-out attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutEscalation {
    /// Dismiss blocking messages and retry
    Normal,
    /// Additionally move the session to a new proxy
    EscalateProxy,
    /// Stop retrying and return whatever signal is readable
    GiveUp,
}

impl TimeoutEscalation {
    /// Tier for a timeout when `retries` timeouts were already handled
    #[must_use]
    pub fn for_retries(retries: u32, ladder: RetryLadderConfig) -> Self {
        if retries >= ladder.give_up_at {
            TimeoutEscalation::GiveUp
        } else if retries == ladder.proxy_at {
            TimeoutEscalation::EscalateProxy
        } else {
            TimeoutEscalation::Normal
        }
    }
}

/// Result of one term evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationOutcome {
    pub signal: u64,
    /// Search attempts made, including the one that succeeded or gave up
    pub attempts: u32,
    /// True if the ladder reached `GiveUp`
    pub gave_up: bool,
}

/// Drives one search through a session and reads the resulting signal
pub struct SearchEvaluator<'a, D, P> {
    driver: &'a mut D,
    pacer: &'a P,
    config: &'a CampaignConfig,
}

impl<'a, D: SessionDriver, P: Pacer> SearchEvaluator<'a, D, P> {
    pub fn new(driver: &'a mut D, pacer: &'a P, config: &'a CampaignConfig) -> Self {
        Self {
            driver,
            pacer,
            config,
        }
    }

    /// Search for `term` and return the reward signal afterwards
    ///
    /// # Errors
    ///
    /// Returns any non-timeout `SessionError`. If the signal cannot be read
    /// after giving up, that failure is reported as `SessionError::Signal`.
    pub async fn evaluate(&mut self, term: &str) -> Result<u64, SessionError> {
        Ok(self.evaluate_detailed(term).await?.signal)
    }

    /// Like `evaluate`, also reporting attempt count and give-up state
    ///
    /// # Errors
    ///
    /// See [`SearchEvaluator::evaluate`].
    pub async fn evaluate_detailed(&mut self, term: &str) -> Result<EvaluationOutcome, SessionError> {
        let config = self.config;
        let label = config.label();
        let ladder = config.retry();
        let mut retries = 0u32;

        loop {
            let error = match self.attempt(term).await {
                Ok(signal) => {
                    return Ok(EvaluationOutcome {
                        signal,
                        attempts: retries + 1,
                        gave_up: false,
                    });
                }
                Err(e) if e.is_timeout() => e,
                Err(e) => return Err(e),
            };

            match TimeoutEscalation::for_retries(retries, ladder) {
                TimeoutEscalation::GiveUp => {
                    error!(
                        "[{}] Cancelling search for '{}' after {} timed-out attempts: {}",
                        label,
                        term,
                        retries + 1,
                        error
                    );
                    let signal = self.driver.read_signal().await.map_err(|e| {
                        SessionError::Signal(format!(
                            "gave up on '{term}' after {} attempts and the signal is unreadable: {e}",
                            retries + 1
                        ))
                    })?;
                    return Ok(EvaluationOutcome {
                        signal,
                        attempts: retries + 1,
                        gave_up: true,
                    });
                }
                TimeoutEscalation::EscalateProxy => {
                    info!("[{}] Timed out {} times, getting new proxy", label, retries + 1);
                    match self.driver.reassign_proxy().await {
                        Ok(()) => {}
                        Err(e) if e.is_timeout() => warn!("[{}] Proxy reassignment timed out: {}", label, e),
                        Err(e) => return Err(e),
                    }
                }
                TimeoutEscalation::Normal => {}
            }

            if let Err(e) = self.driver.dismiss_messages().await {
                debug!("[{}] Could not dismiss messages: {}", label, e);
            }
            warn!(
                "[{}] Timeout on attempt {} for '{}', retrying: {}",
                label,
                retries + 1,
                term,
                error
            );
            self.pacer.pause(config.pacing().backoff).await;
            retries += 1;
        }
    }

    async fn attempt(&mut self, term: &str) -> Result<u64, SessionError> {
        let config = self.config;
        let selector = config.search_box_selector();
        let pacing = config.pacing();

        self.driver.wait_interactable(selector).await?;
        self.driver.type_and_submit(selector, term).await?;
        self.pacer.pause(pacing.dwell).await;

        for _ in 0..config.scrolls() {
            self.driver.scroll_to_bottom().await?;
            self.pacer.pause(pacing.scroll).await;
        }

        self.driver.read_signal().await
    }
}
