//! Getter methods for `CampaignConfig` and `SessionConfig`

use super::types::{CampaignConfig, PacingConfig, RetryLadderConfig, SessionConfig};

impl CampaignConfig {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    #[must_use]
    pub fn search_box_selector(&self) -> &str {
        &self.search_box_selector
    }

    #[must_use]
    pub fn extra_terms(&self) -> usize {
        self.extra_terms
    }

    #[must_use]
    pub fn max_fallbacks(&self) -> usize {
        self.max_fallbacks
    }

    #[must_use]
    pub fn scrolls(&self) -> usize {
        self.scrolls
    }

    #[must_use]
    pub fn pacing(&self) -> &PacingConfig {
        &self.pacing
    }

    #[must_use]
    pub fn retry(&self) -> RetryLadderConfig {
        self.retry
    }
}

impl SessionConfig {
    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn signal_selector(&self) -> &str {
        &self.signal_selector
    }

    #[must_use]
    pub fn dismiss_selectors(&self) -> &[String] {
        &self.dismiss_selectors
    }

    #[must_use]
    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    #[must_use]
    pub fn operation_timeout_secs(&self) -> u64 {
        self.operation_timeout_secs
    }

    #[must_use]
    pub fn interactable_timeout_secs(&self) -> u64 {
        self.interactable_timeout_secs
    }
}
