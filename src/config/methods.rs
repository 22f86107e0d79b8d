//! Fluent setters and validation
//!
//! Setters consume and return the config so call sites read as a chain:
//!
//! ```rust
//! # use kodegen_tools_rewards_search::config::CampaignConfig;
//! let config = CampaignConfig::default()
//!     .with_label("mobile")
//!     .with_max_fallbacks(2);
//! assert_eq!(config.label(), "mobile");
//! ```

use super::ConfigError;
use super::types::{CampaignConfig, PacingConfig, RetryLadderConfig, SessionConfig};

impl CampaignConfig {
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    #[must_use]
    pub fn with_search_box_selector(mut self, selector: impl Into<String>) -> Self {
        self.search_box_selector = selector.into();
        self
    }

    #[must_use]
    pub fn with_extra_terms(mut self, extra: usize) -> Self {
        self.extra_terms = extra;
        self
    }

    #[must_use]
    pub fn with_max_fallbacks(mut self, max: usize) -> Self {
        self.max_fallbacks = max;
        self
    }

    #[must_use]
    pub fn with_scrolls(mut self, scrolls: usize) -> Self {
        self.scrolls = scrolls;
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryLadderConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a delay range is inverted, the
    /// search box selector is empty, or the proxy tier does not come before
    /// the give-up tier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_box_selector.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "search_box_selector must not be empty".to_string(),
            ));
        }

        for (name, range) in [
            ("dwell", self.pacing.dwell),
            ("scroll", self.pacing.scroll),
            ("backoff", self.pacing.backoff),
        ] {
            if !range.is_valid() {
                return Err(ConfigError::Invalid(format!(
                    "pacing.{name} range is inverted ({} > {})",
                    range.min, range.max
                )));
            }
        }

        if self.retry.proxy_at >= self.retry.give_up_at {
            return Err(ConfigError::Invalid(format!(
                "retry.proxy_at ({}) must be below retry.give_up_at ({})",
                self.retry.proxy_at, self.retry.give_up_at
            )));
        }

        Ok(())
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn with_signal_selector(mut self, selector: impl Into<String>) -> Self {
        self.signal_selector = selector.into();
        self
    }

    #[must_use]
    pub fn with_dismiss_selectors(mut self, selectors: Vec<String>) -> Self {
        self.dismiss_selectors = selectors;
        self
    }

    #[must_use]
    pub fn with_proxies(mut self, proxies: Vec<String>) -> Self {
        self.proxies = proxies;
        self
    }

    #[must_use]
    pub fn with_operation_timeout_secs(mut self, secs: u64) -> Self {
        self.operation_timeout_secs = secs;
        self
    }
}
