//! Configuration defaults, validation and partial deserialization

use kodegen_tools_rewards_search::config::{
    CampaignConfig, ConfigError, DelayRange, PacingConfig, RetryLadderConfig, SessionConfig,
    TermPoolConfig,
};

#[test]
fn test_campaign_defaults() {
    let config = CampaignConfig::default();

    assert_eq!(config.label(), "desktop");
    assert_eq!(config.search_url(), "https://bing.com");
    assert_eq!(config.search_box_selector(), "#sb_form_q");
    assert_eq!(config.extra_terms(), 3);
    assert_eq!(config.max_fallbacks(), 3);
    assert_eq!(config.scrolls(), 3);
    assert_eq!(config.pacing().dwell, DelayRange::new(100, 180));
    assert_eq!(config.pacing().scroll, DelayRange::new(7, 10));
    assert_eq!(config.pacing().backoff, DelayRange::new(7, 15));
    assert_eq!(
        config.retry(),
        RetryLadderConfig {
            proxy_at: 5,
            give_up_at: 10
        }
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_pool_and_session_defaults() {
    let pool = TermPoolConfig::default();
    assert_eq!(pool.initial_capacity, 200);
    assert_eq!(pool.max_day_offset, 30);
    assert_eq!(pool.locale.language, "en");
    assert_eq!(pool.locale.region, "US");

    let session = SessionConfig::default();
    assert!(session.headless());
    assert_eq!(session.signal_selector(), "#id_rc");
    assert!(session.proxies().is_empty());
}

#[test]
fn test_validate_rejects_inverted_range() {
    let config = CampaignConfig::default().with_pacing(PacingConfig {
        dwell: DelayRange::new(10, 5),
        ..PacingConfig::default()
    });

    let err = config.validate().unwrap_err();
    let ConfigError::Invalid(msg) = err;
    assert!(msg.contains("dwell"));
}

#[test]
fn test_validate_rejects_empty_selector() {
    let config = CampaignConfig::default().with_search_box_selector("  ");
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_proxy_tier_after_give_up() {
    let config = CampaignConfig::default().with_retry(RetryLadderConfig {
        proxy_at: 10,
        give_up_at: 10,
    });
    assert!(config.validate().is_err());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config: CampaignConfig = serde_json::from_str(
        r#"{"label":"mobile","max_fallbacks":1,"pacing":{"unit_ms":10}}"#,
    )
    .unwrap();

    assert_eq!(config.label(), "mobile");
    assert_eq!(config.max_fallbacks(), 1);
    assert_eq!(config.pacing().unit_ms, 10);
    assert_eq!(config.pacing().dwell, DelayRange::new(100, 180));
    assert_eq!(config.search_url(), "https://bing.com");
}

#[test]
fn test_session_proxies_from_json() {
    let session: SessionConfig =
        serde_json::from_str(r#"{"proxies":["http://10.0.0.1:3128","http://10.0.0.2:3128"]}"#)
            .unwrap();

    assert_eq!(session.proxies().len(), 2);
    assert_eq!(session.operation_timeout_secs(), 30);
}

#[test]
fn test_builder_chain() {
    let session = SessionConfig::default()
        .with_headless(false)
        .with_proxies(vec!["socks5://127.0.0.1:1080".to_string()]);

    assert!(!session.headless());
    assert_eq!(session.proxies().to_vec(), vec!["socks5://127.0.0.1:1080".to_string()]);
}
