//! Shared pool of search terms with a forward-only read cursor
//!
//! The pool is refilled from a `TrendSource`, walking back one day per call
//! until the deduplicated term count reaches the pool's capacity. Batches are
//! handed out in insertion order.
//!
//! # Invariants
//! - `0 <= cursor <= terms.len()`
//! - terms are pairwise distinct after lowercase normalisation
//! - a batch larger than the unconsumed remainder resets the pool first, so
//!   stale and fresh terms are never mixed
//! - a failed refill leaves the committed state exactly as it was
//!
//! # Thread Safety
//! The reset/refill/advance sequence runs under one `tokio::sync::Mutex`
//! guard, so campaigns sharing an `Arc<TermPool<_>>` are serialized.

use std::collections::HashSet;

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::errors::DataSourceError;
use super::trends::TrendSource;
use crate::config::TermPoolConfig;
use crate::utils::string_utils::normalize_term;

#[derive(Debug, Clone, Default)]
struct PoolState {
    terms: Vec<String>,
    seen: HashSet<String>,
    cursor: usize,
    capacity: usize,
}

impl PoolState {
    fn remaining(&self) -> usize {
        self.terms.len() - self.cursor
    }

    fn reset(&mut self) {
        self.terms.clear();
        self.seen.clear();
        self.cursor = 0;
    }

    /// Returns true if the term was new
    fn insert(&mut self, raw: &str) -> bool {
        match normalize_term(raw) {
            Some(term) if self.seen.insert(term.clone()) => {
                self.terms.push(term);
                true
            }
            _ => false,
        }
    }

    fn take(&mut self, n: usize) -> Vec<String> {
        let start = self.cursor;
        let end = (start + n).min(self.terms.len());
        self.cursor = end;
        self.terms[start..end].to_vec()
    }
}

/// Read-only view of the pool for observability and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub terms: Vec<String>,
    pub cursor: usize,
    pub capacity: usize,
}

impl PoolSnapshot {
    /// Terms not yet handed out
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.terms.len() - self.cursor
    }
}

/// Deduplicated, lazily replenished term supply
pub struct TermPool<S> {
    source: S,
    config: TermPoolConfig,
    state: Mutex<PoolState>,
}

impl<S: TrendSource> TermPool<S> {
    pub fn new(source: S, config: TermPoolConfig) -> Self {
        let state = PoolState {
            capacity: config.initial_capacity,
            ..PoolState::default()
        };
        Self {
            source,
            config,
            state: Mutex::new(state),
        }
    }

    /// Hand out the next `n` terms, refilling from the trend source if needed
    ///
    /// `n == 0` returns an empty batch without touching the pool.
    ///
    /// # Errors
    ///
    /// Returns the trend source's `DataSourceError`, or
    /// `DataSourceError::FeedExhausted` when `max_day_offset` days were not
    /// enough to reach capacity. The pool is unchanged on error.
    pub async fn fetch(&self, n: usize) -> Result<Vec<String>, DataSourceError> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut guard = self.state.lock().await;
        let mut staged = guard.clone();

        staged.capacity = staged.capacity.max(n.saturating_mul(2));

        if staged.remaining() < n {
            info!(
                "Term pool exhausted ({} of {} left for a batch of {}), resetting",
                staged.remaining(),
                staged.terms.len(),
                n
            );
            staged.reset();
        }

        if staged.terms.len() < staged.capacity {
            self.refill(&mut staged).await?;
        }

        let batch = staged.take(n);
        *guard = staged;

        debug!("Handed out {} term(s), cursor now {}", batch.len(), guard.cursor);
        Ok(batch)
    }

    async fn refill(&self, state: &mut PoolState) -> Result<(), DataSourceError> {
        let mut day_offset = 0u32;

        while state.terms.len() < state.capacity {
            day_offset += 1;
            if day_offset > self.config.max_day_offset {
                return Err(DataSourceError::FeedExhausted {
                    max_day_offset: self.config.max_day_offset,
                    collected: state.terms.len(),
                    capacity: state.capacity,
                });
            }

            let topics = self.source.fetch_day(&self.config.locale, day_offset).await?;

            let added = topics
                .iter()
                .flat_map(|topic| topic.queries())
                .filter(|query| state.insert(query))
                .count();

            debug!(
                "Day offset {}: {} topic(s), {} new term(s), pool {}/{}",
                day_offset,
                topics.len(),
                added,
                state.terms.len(),
                state.capacity
            );
        }

        info!(
            "Term pool refilled to {} term(s) from {} day(s) of trends",
            state.terms.len(),
            day_offset
        );
        Ok(())
    }

    /// Drop all terms and rewind the cursor; capacity is kept
    pub async fn reset(&self) {
        self.state.lock().await.reset();
    }

    pub async fn snapshot(&self) -> PoolSnapshot {
        let state = self.state.lock().await;
        PoolSnapshot {
            terms: state.terms.clone(),
            cursor: state.cursor,
            capacity: state.capacity,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &TermPoolConfig {
        &self.config
    }
}
