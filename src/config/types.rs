//! Core configuration types for search campaigns
//!
//! This module contains the configuration structs for the campaign state
//! machine, the term pool, the HTTP term sources and the browser session.
//! Every struct deserializes with defaults for any omitted field.

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    BING_SUGGEST_BASE_URL, CHROME_USER_AGENT, DEFAULT_BACKOFF_RANGE, DEFAULT_DISMISS_SELECTORS,
    DEFAULT_DWELL_RANGE, DEFAULT_EXTRA_TERMS, DEFAULT_GIVE_UP_AT,
    DEFAULT_INTERACTABLE_TIMEOUT_SECS, DEFAULT_MAX_DAY_OFFSET, DEFAULT_MAX_FALLBACKS,
    DEFAULT_OPERATION_TIMEOUT_SECS, DEFAULT_PACING_UNIT_MS, DEFAULT_POOL_CAPACITY,
    DEFAULT_PROXY_AT, DEFAULT_SCROLL_RANGE, DEFAULT_SCROLLS, DEFAULT_SEARCH_BOX_SELECTOR,
    DEFAULT_SEARCH_URL, DEFAULT_SIGNAL_SELECTOR, DEFAULT_TREND_LANGUAGE, DEFAULT_TREND_REGION,
    GOOGLE_TRENDS_BASE_URL, SUGGEST_TIMEOUT_SECS, TRENDS_TIMEOUT_SECS,
};

/// Inclusive range of pacing units a pause is sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl DelayRange {
    #[must_use]
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// A range that always yields zero
    #[must_use]
    pub const fn zero() -> Self {
        Self { min: 0, max: 0 }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

impl From<(u64, u64)> for DelayRange {
    fn from((min, max): (u64, u64)) -> Self {
        Self { min, max }
    }
}

/// Human pacing between UI actions
///
/// Ranges are expressed in units of `unit_ms` milliseconds, so the whole
/// schedule can be compressed for staging runs by shrinking the unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Length of one pacing unit in milliseconds
    pub unit_ms: u64,
    /// Dwell after a search is submitted
    pub dwell: DelayRange,
    /// Pause after each scroll
    pub scroll: DelayRange,
    /// Pause before retrying a timed-out search
    pub backoff: DelayRange,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            unit_ms: DEFAULT_PACING_UNIT_MS,
            dwell: DEFAULT_DWELL_RANGE.into(),
            scroll: DEFAULT_SCROLL_RANGE.into(),
            backoff: DEFAULT_BACKOFF_RANGE.into(),
        }
    }
}

/// Thresholds of the timeout retry ladder
///
/// Both values count timeouts already handled for the current term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryLadderConfig {
    /// Timeout count at which a new proxy is requested
    pub proxy_at: u32,
    /// Timeout count at which retries stop
    pub give_up_at: u32,
}

impl Default for RetryLadderConfig {
    fn default() -> Self {
        Self {
            proxy_at: DEFAULT_PROXY_AT,
            give_up_at: DEFAULT_GIVE_UP_AT,
        }
    }
}

/// Main configuration struct for a search campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    /// Session label used in logs and events (e.g. `desktop`, `mobile`)
    pub(crate) label: String,
    pub(crate) search_url: String,
    pub(crate) search_box_selector: String,
    /// Headroom sourced on top of the target
    pub(crate) extra_terms: usize,
    pub(crate) max_fallbacks: usize,
    pub(crate) scrolls: usize,
    pub(crate) pacing: PacingConfig,
    pub(crate) retry: RetryLadderConfig,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            label: "desktop".to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            search_box_selector: DEFAULT_SEARCH_BOX_SELECTOR.to_string(),
            extra_terms: DEFAULT_EXTRA_TERMS,
            max_fallbacks: DEFAULT_MAX_FALLBACKS,
            scrolls: DEFAULT_SCROLLS,
            pacing: PacingConfig::default(),
            retry: RetryLadderConfig::default(),
        }
    }
}

/// Language and region the trend feed is queried for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendLocale {
    /// Interface language (`hl`), e.g. `en`
    pub language: String,
    /// Region code (`geo`), e.g. `US`
    pub region: String,
}

impl TrendLocale {
    pub fn new(language: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            region: region.into(),
        }
    }
}

impl Default for TrendLocale {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_LANGUAGE, DEFAULT_TREND_REGION)
    }
}

/// Term pool sizing and refill bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TermPoolConfig {
    pub locale: TrendLocale,
    /// Soft target size before any batch has been requested
    pub initial_capacity: usize,
    /// Furthest day-offset queried during a single refill
    pub max_day_offset: u32,
}

impl Default for TermPoolConfig {
    fn default() -> Self {
        Self {
            locale: TrendLocale::default(),
            initial_capacity: DEFAULT_POOL_CAPACITY,
            max_day_offset: DEFAULT_MAX_DAY_OFFSET,
        }
    }
}

/// HTTP settings for the daily trends client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for TrendsClientConfig {
    fn default() -> Self {
        Self {
            base_url: GOOGLE_TRENDS_BASE_URL.to_string(),
            timeout_secs: TRENDS_TIMEOUT_SECS,
        }
    }
}

/// HTTP settings for the related-term suggestion client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for SuggestClientConfig {
    fn default() -> Self {
        Self {
            base_url: BING_SUGGEST_BASE_URL.to_string(),
            user_agent: CHROME_USER_AGENT.to_string(),
            timeout_secs: SUGGEST_TIMEOUT_SECS,
        }
    }
}

/// Browser session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub(crate) headless: bool,
    pub(crate) user_agent: String,
    pub(crate) signal_selector: String,
    pub(crate) dismiss_selectors: Vec<String>,
    /// Proxy servers rotated through by `reassign_proxy()`
    pub(crate) proxies: Vec<String>,
    pub(crate) operation_timeout_secs: u64,
    pub(crate) interactable_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: CHROME_USER_AGENT.to_string(),
            signal_selector: DEFAULT_SIGNAL_SELECTOR.to_string(),
            dismiss_selectors: DEFAULT_DISMISS_SELECTORS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            proxies: Vec::new(),
            operation_timeout_secs: DEFAULT_OPERATION_TIMEOUT_SECS,
            interactable_timeout_secs: DEFAULT_INTERACTABLE_TIMEOUT_SECS,
        }
    }
}
