//! Search campaign state machine
//!
//! Sourcing → Searching → (Retrying)* → Advancing → {Searching | Done | Aborted}
//!
//! A campaign sources `target + extra_terms` terms up front, searches them in
//! order and counts every search that strictly raises the reward signal.
//! When a term leaves the signal flat (or lower), up to `max_fallbacks`
//! related terms are tried, each after a page refresh. A reading below the
//! baseline after fallbacks aborts the run: a decreasing signal means the
//! measurement channel can no longer be trusted.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::evaluate::SearchEvaluator;
use super::pacing::{HumanPacer, Pacer};
use super::progress::{CampaignEvent, NoOpProgress, ProgressReporter};
use super::types::{CampaignError, CampaignReport, Termination};
use crate::config::CampaignConfig;
use crate::session::{SessionDriver, SessionError};
use crate::terms::{RelatedTermSource, TermPool, TrendSource, related_terms};

/// Per-run bookkeeping, dropped when `run` returns
#[derive(Debug)]
struct RunState {
    target: usize,
    baseline: u64,
    success_count: usize,
    term_index: usize,
    candidates: usize,
    fallbacks: usize,
}

impl RunState {
    fn new(target: usize, baseline: u64) -> Self {
        Self {
            target,
            baseline,
            success_count: 0,
            term_index: 0,
            candidates: 0,
            fallbacks: 0,
        }
    }

    fn report(&self, termination: Termination) -> CampaignReport {
        CampaignReport {
            final_signal: self.baseline,
            success_count: self.success_count,
            target: self.target,
            iterations: self.term_index,
            candidates: self.candidates,
            fallbacks: self.fallbacks,
            termination,
        }
    }
}

/// Orchestrates reward-increasing searches through one session
///
/// Borrows the shared term pool, the related-term source and the session
/// for the duration of the campaign; owns only its pacing and reporting.
pub struct SearchCampaign<'a, S, R, D, P = HumanPacer> {
    config: &'a CampaignConfig,
    pool: &'a TermPool<S>,
    related: &'a R,
    driver: &'a mut D,
    pacer: P,
    progress: Arc<dyn ProgressReporter>,
}

impl<'a, S, R, D> SearchCampaign<'a, S, R, D, HumanPacer> {
    /// Campaign with human pacing from `config` and no progress reporting
    pub fn new(
        config: &'a CampaignConfig,
        pool: &'a TermPool<S>,
        related: &'a R,
        driver: &'a mut D,
    ) -> Self {
        Self {
            pacer: HumanPacer::from_config(config.pacing()),
            config,
            pool,
            related,
            driver,
            progress: Arc::new(NoOpProgress),
        }
    }
}

impl<'a, S, R, D, P> SearchCampaign<'a, S, R, D, P> {
    /// Replace the pacing strategy
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> SearchCampaign<'a, S, R, D, Q> {
        SearchCampaign {
            config: self.config,
            pool: self.pool,
            related: self.related,
            driver: self.driver,
            pacer,
            progress: self.progress,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }
}

impl<S, R, D, P> SearchCampaign<'_, S, R, D, P>
where
    S: TrendSource,
    R: RelatedTermSource,
    D: SessionDriver,
    P: Pacer,
{
    /// Run until `target` searches raised the signal, terms run out, or the
    /// signal regresses
    ///
    /// The report always carries the last trusted signal, including on
    /// early termination.
    ///
    /// # Errors
    ///
    /// `CampaignError::TermSupply` if terms cannot be sourced (before any
    /// search), `CampaignError::Session` on a non-timeout session failure.
    pub async fn run(
        &mut self,
        target: usize,
        initial_baseline: u64,
    ) -> Result<CampaignReport, CampaignError> {
        let config = self.config;
        let label = config.label();
        info!(
            "[{}] Search campaign start - target: {} signal: {}",
            label, target, initial_baseline
        );
        self.progress.report(CampaignEvent::Started {
            label: label.to_string(),
            target,
            baseline: initial_baseline,
            timestamp: Utc::now(),
        });

        let mut state = RunState::new(target, initial_baseline);
        if target == 0 {
            return Ok(self.finish(&state, Termination::TargetMet));
        }

        let terms = self
            .pool
            .fetch(target.saturating_add(config.extra_terms()))
            .await?;
        state.candidates = terms.len();

        self.driver.navigate(config.search_url()).await?;

        let mut regression = None;
        while state.success_count < target && state.term_index < terms.len() {
            let term = &terms[state.term_index];
            state.term_index += 1;

            info!(
                "[{}] Iteration: {}/{} Progress: {}/{} Word: {}",
                label,
                state.term_index,
                state.candidates,
                state.success_count,
                target,
                term
            );
            self.progress.report(CampaignEvent::Iteration {
                index: state.term_index,
                candidates: state.candidates,
                progress: state.success_count,
                target,
                term: term.clone(),
                signal: state.baseline,
                timestamp: Utc::now(),
            });

            let mut signal = self.evaluate(term).await?;
            if signal <= state.baseline {
                signal = self.try_fallbacks(term, signal, &mut state).await?;
            }

            match signal.cmp(&state.baseline) {
                Ordering::Greater => {
                    state.baseline = signal;
                    state.success_count += 1;
                }
                Ordering::Equal => {
                    warn!("[{}] No signal gained (signal: {})", label, signal);
                    self.progress.report(CampaignEvent::NoGain {
                        term: term.clone(),
                        signal,
                        timestamp: Utc::now(),
                    });
                }
                Ordering::Less => {
                    warn!(
                        "[{}] Invalid signal returned (signal: {}, baseline: {}), aborting",
                        label, signal, state.baseline
                    );
                    self.progress.report(CampaignEvent::Regression {
                        term: term.clone(),
                        signal,
                        baseline: state.baseline,
                        timestamp: Utc::now(),
                    });
                    regression = Some(signal);
                    break;
                }
            }
        }

        let termination = match regression {
            Some(observed) => Termination::SignalRegression { observed },
            None if state.success_count >= target => Termination::TargetMet,
            None => Termination::TermsExhausted,
        };
        Ok(self.finish(&state, termination))
    }

    async fn evaluate(&mut self, term: &str) -> Result<u64, SessionError> {
        SearchEvaluator::new(&mut *self.driver, &self.pacer, self.config)
            .evaluate(term)
            .await
    }

    /// Search related terms until one beats the baseline
    ///
    /// Returns the last observed signal.
    async fn try_fallbacks(
        &mut self,
        term: &str,
        signal: u64,
        state: &mut RunState,
    ) -> Result<u64, SessionError> {
        let config = self.config;
        let label = config.label();
        let candidates = related_terms(self.related, term).await;
        let max = config.max_fallbacks().min(candidates.len());

        let mut signal = signal;
        for (attempt, candidate) in candidates.iter().take(max).enumerate() {
            warn!("[{}] Possible blockage. Refreshing the page.", label);
            self.driver.refresh().await?;

            info!(
                "[{}] Retry: {}/{} Word: {} (signal: {})",
                label,
                attempt + 1,
                max,
                candidate,
                signal
            );
            self.progress.report(CampaignEvent::Fallback {
                attempt: attempt + 1,
                max,
                term: candidate.clone(),
                signal,
                timestamp: Utc::now(),
            });

            state.fallbacks += 1;
            signal = self.evaluate(candidate).await?;
            if signal > state.baseline {
                break;
            }
        }

        Ok(signal)
    }

    fn finish(&self, state: &RunState, termination: Termination) -> CampaignReport {
        let report = state.report(termination);
        info!(
            "[{}] Search campaign done - Iteration: {}/{} Progress: {}/{} Signal: {} ({:?})",
            self.config.label(),
            report.iterations,
            report.candidates,
            report.success_count,
            report.target,
            report.final_signal,
            report.termination
        );
        self.progress.report(CampaignEvent::Finished {
            report: report.clone(),
            timestamp: Utc::now(),
        });
        report
    }
}
