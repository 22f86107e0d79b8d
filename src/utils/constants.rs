//! Shared configuration constants for rewards search
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Search engine home page the session is pointed at before the first search
pub const DEFAULT_SEARCH_URL: &str = "https://bing.com";

/// CSS selector for the search input box on the search home page
pub const DEFAULT_SEARCH_BOX_SELECTOR: &str = "#sb_form_q";

/// CSS selector for the rewards counter in the search header
pub const DEFAULT_SIGNAL_SELECTOR: &str = "#id_rc";

/// Buttons that close cookie banners, sign-in nags and promo overlays
///
/// Clicked in order by `dismiss_messages()`. Missing elements are ignored.
pub const DEFAULT_DISMISS_SELECTORS: &[&str] = &[
    "#bnp_btn_accept",
    "#bnp_close_link",
    "#bnp_hfly_cta2",
    "#reward_pivot_earn",
    ".b_hide",
];

/// Extra terms sourced on top of the requested target
///
/// Absorbs searches that fail to move the reward signal.
pub const DEFAULT_EXTRA_TERMS: usize = 3;

/// Upper bound on related-term fallbacks per primary term
pub const DEFAULT_MAX_FALLBACKS: usize = 3;

/// Scroll actions performed after each submitted search
pub const DEFAULT_SCROLLS: usize = 3;

/// Length of one pacing unit in milliseconds
pub const DEFAULT_PACING_UNIT_MS: u64 = 1000;

/// Dwell after submitting a search, in pacing units
pub const DEFAULT_DWELL_RANGE: (u64, u64) = (100, 180);

/// Pause after each scroll, in pacing units
pub const DEFAULT_SCROLL_RANGE: (u64, u64) = (7, 10);

/// Pause before retrying a timed-out search, in pacing units
pub const DEFAULT_BACKOFF_RANGE: (u64, u64) = (7, 15);

/// Timeout count at which a new proxy is requested
pub const DEFAULT_PROXY_AT: u32 = 5;

/// Timeout count at which evaluation stops retrying and reads the signal
pub const DEFAULT_GIVE_UP_AT: u32 = 10;

/// Initial soft size of the term pool
pub const DEFAULT_POOL_CAPACITY: usize = 200;

/// Furthest day back the trend feed is queried during one refill
pub const DEFAULT_MAX_DAY_OFFSET: u32 = 30;

/// Default trend feed language
pub const DEFAULT_TREND_LANGUAGE: &str = "en";

/// Default trend feed region
pub const DEFAULT_TREND_REGION: &str = "US";

/// Google Trends API base URL
pub const GOOGLE_TRENDS_BASE_URL: &str = "https://trends.google.com";

/// Length of the `)]}',\n` guard Google prepends to JSON responses
pub const TRENDS_RESPONSE_PREFIX_LEN: usize = 6;

/// Timezone offset parameter the daily trends endpoint expects
pub const TRENDS_NS_PARAM: &str = "15";

/// Bing open-search suggestion API base URL
pub const BING_SUGGEST_BASE_URL: &str = "https://api.bing.com";

/// Request timeout for the suggestion endpoint (seconds)
pub const SUGGEST_TIMEOUT_SECS: u64 = 60;

/// Request timeout for the trends endpoint (seconds)
pub const TRENDS_TIMEOUT_SECS: u64 = 30;

/// Timeout for a single CDP operation against the page (seconds)
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 30;

/// How long to wait for an element to become interactable (seconds)
pub const DEFAULT_INTERACTABLE_TIMEOUT_SECS: u64 = 10;

/// Chrome user agent string for stealth mode
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
/// Next update: 2025-04-29 (quarterly schedule)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
