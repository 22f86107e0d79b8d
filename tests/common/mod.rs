//! Test doubles shared by the campaign and pool test suites

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use kodegen_tools_rewards_search::config::{DelayRange, TrendLocale};
use kodegen_tools_rewards_search::session::{SessionDriver, SessionError};
use kodegen_tools_rewards_search::terms::{
    DataSourceError, EnrichmentError, RelatedTermSource, TrendSource, TrendingTopic,
};
use kodegen_tools_rewards_search::campaign::Pacer;

/// Install a test subscriber once; honours `RUST_LOG`
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Trend source
// =============================================================================

/// Trend source serving canned or generated days
#[allow(dead_code)]
pub struct StaticTrends {
    days: Vec<Vec<TrendingTopic>>,
    /// When set, day `d` yields `per_day` unique topics `topic d-i`
    per_day: Option<usize>,
    failing: AtomicBool,
    calls: Mutex<Vec<u32>>,
}

#[allow(dead_code)]
impl StaticTrends {
    /// Days in order: index 0 is day-offset 1. Later offsets are empty.
    pub fn new(days: Vec<Vec<TrendingTopic>>) -> Self {
        Self {
            days,
            per_day: None,
            failing: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn generated(per_day: usize) -> Self {
        Self {
            per_day: Some(per_day),
            ..Self::new(Vec::new())
        }
    }

    /// Single day of headline-only topics
    pub fn titles(titles: &[&str]) -> Self {
        Self::new(vec![
            titles
                .iter()
                .map(|t| TrendingTopic::new(*t, Vec::new()))
                .collect(),
        ])
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

impl TrendSource for StaticTrends {
    async fn fetch_day(
        &self,
        _locale: &TrendLocale,
        day_offset: u32,
    ) -> Result<Vec<TrendingTopic>, DataSourceError> {
        self.calls.lock().unwrap().push(day_offset);

        if self.failing.load(Ordering::SeqCst) {
            return Err(DataSourceError::Malformed("unexpected token".to_string()));
        }

        if let Some(per_day) = self.per_day {
            return Ok((0..per_day)
                .map(|i| TrendingTopic::new(format!("Topic {day_offset}-{i}"), Vec::new()))
                .collect());
        }

        Ok(self
            .days
            .get(day_offset as usize - 1)
            .cloned()
            .unwrap_or_default())
    }
}

// =============================================================================
// Related-term source
// =============================================================================

#[allow(dead_code)]
#[derive(Default)]
pub struct StaticRelated {
    terms: HashMap<String, Vec<String>>,
    failing: bool,
    lookups: AtomicUsize,
}

#[allow(dead_code)]
impl StaticRelated {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, word: &str, related: &[&str]) -> Self {
        self.terms.insert(
            word.to_string(),
            related.iter().map(|s| (*s).to_string()).collect(),
        );
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl RelatedTermSource for StaticRelated {
    async fn lookup(&self, term: &str) -> Result<Vec<String>, EnrichmentError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(EnrichmentError::Status(503));
        }
        Ok(self.terms.get(term).cloned().unwrap_or_default())
    }
}

// =============================================================================
// Session driver
// =============================================================================

/// Outcome of one scripted search attempt
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Step {
    /// Search succeeds and the signal reads this value afterwards
    Signal(u64),
    /// Submitting times out
    Timeout,
    /// Submitting fails permanently
    Fail,
}

/// Session whose search attempts follow a script
///
/// `read_signal` returns the value of the last `Signal` step, or the initial
/// value if none ran yet. Once the script is exhausted, `default_step` is
/// used for every further attempt.
#[allow(dead_code)]
pub struct ScriptedSession {
    script: VecDeque<Step>,
    default_step: Step,
    current: u64,
    signal_readable: bool,
    pub submitted: Vec<String>,
    pub navigations: Vec<String>,
    pub refreshes: usize,
    pub dismissals: usize,
    pub proxy_reassignments: usize,
    pub scrolls: usize,
    pub signal_reads: usize,
}

#[allow(dead_code)]
impl ScriptedSession {
    pub fn new(initial_signal: u64, script: Vec<Step>) -> Self {
        Self {
            script: script.into(),
            default_step: Step::Signal(initial_signal),
            current: initial_signal,
            signal_readable: true,
            submitted: Vec::new(),
            navigations: Vec::new(),
            refreshes: 0,
            dismissals: 0,
            proxy_reassignments: 0,
            scrolls: 0,
            signal_reads: 0,
        }
    }

    /// Readings in order, one per search attempt
    pub fn readings(initial_signal: u64, readings: &[u64]) -> Self {
        Self::new(
            initial_signal,
            readings.iter().map(|v| Step::Signal(*v)).collect(),
        )
    }

    pub fn always_timing_out(initial_signal: u64) -> Self {
        let mut session = Self::new(initial_signal, Vec::new());
        session.default_step = Step::Timeout;
        session
    }

    pub fn with_unreadable_signal(mut self) -> Self {
        self.signal_readable = false;
        self
    }
}

impl SessionDriver for ScriptedSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.navigations.push(url.to_string());
        Ok(())
    }

    async fn wait_interactable(&mut self, _locator: &str) -> Result<(), SessionError> {
        Ok(())
    }

    async fn type_and_submit(&mut self, _locator: &str, text: &str) -> Result<(), SessionError> {
        self.submitted.push(text.to_string());
        let step = self
            .script
            .pop_front()
            .unwrap_or_else(|| self.default_step.clone());
        match step {
            Step::Signal(v) => {
                self.current = v;
                Ok(())
            }
            Step::Timeout => Err(SessionError::Timeout("search box".to_string())),
            Step::Fail => Err(SessionError::Element("search box detached".to_string())),
        }
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), SessionError> {
        self.scrolls += 1;
        Ok(())
    }

    async fn read_signal(&mut self) -> Result<u64, SessionError> {
        self.signal_reads += 1;
        if self.signal_readable {
            Ok(self.current)
        } else {
            Err(SessionError::Timeout("rewards counter".to_string()))
        }
    }

    async fn refresh(&mut self) -> Result<(), SessionError> {
        self.refreshes += 1;
        Ok(())
    }

    async fn dismiss_messages(&mut self) -> Result<(), SessionError> {
        self.dismissals += 1;
        Ok(())
    }

    async fn reassign_proxy(&mut self) -> Result<(), SessionError> {
        self.proxy_reassignments += 1;
        Ok(())
    }
}

// =============================================================================
// Pacer
// =============================================================================

/// Records every requested pause without sleeping
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingPacer {
    pauses: Mutex<Vec<DelayRange>>,
}

#[allow(dead_code)]
impl RecordingPacer {
    pub fn pauses(&self) -> Vec<DelayRange> {
        self.pauses.lock().unwrap().clone()
    }
}

impl Pacer for RecordingPacer {
    async fn pause(&self, range: DelayRange) {
        self.pauses.lock().unwrap().push(range);
    }
}
