//! Term and signal text helpers
//!
//! Normalisation shared by the term pool and the related-term adapter, plus
//! parsing of the reward counter text scraped from the search page.

/// Normalise a search term for storage and comparison.
///
/// Trims surrounding whitespace and lowercases. Returns `None` for terms
/// that are empty after trimming.
///
/// # Examples
/// ```
/// # use kodegen_tools_rewards_search::utils::string_utils::normalize_term;
/// assert_eq!(normalize_term("  Example Query "), Some("example query".to_string()));
/// assert_eq!(normalize_term("   "), None);
/// ```
#[inline]
pub fn normalize_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Parse a reward counter such as `"1,234"` or `"Rewards 1 234 pts"`.
///
/// All ASCII digits in the text are concatenated; separators and labels are
/// ignored. Returns `None` when the text carries no digits or overflows `u64`.
///
/// # Examples
/// ```
/// # use kodegen_tools_rewards_search::utils::string_utils::parse_signal_text;
/// assert_eq!(parse_signal_text("1,234"), Some(1234));
/// assert_eq!(parse_signal_text(" 87 "), Some(87));
/// assert_eq!(parse_signal_text("--"), None);
/// ```
pub fn parse_signal_text(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
