//! Configuration module for search campaigns
//!
//! Serde-deserializable settings with defaults for every field, so a config
//! file only needs to name what it overrides.

// Sub-modules
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use types::{
    CampaignConfig, DelayRange, PacingConfig, RetryLadderConfig, SessionConfig,
    SuggestClientConfig, TermPoolConfig, TrendLocale, TrendsClientConfig,
};

/// Configuration validation failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
