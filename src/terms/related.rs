//! Related-term lookup for fallback searches
//!
//! Related terms are a best-effort enrichment. The source trait reports
//! failures as a typed `EnrichmentError`; the `related_terms` adapter is the
//! single place that downgrades them to an empty list.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use reqwest::header::USER_AGENT;
use tracing::debug;
use url::Url;

use super::errors::EnrichmentError;
use crate::config::SuggestClientConfig;
use crate::utils::string_utils::normalize_term;

/// Source of terms related to a given search term
pub trait RelatedTermSource: Send + Sync {
    /// Raw suggestions for `term`, in source order
    fn lookup(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<String>, EnrichmentError>> + Send;
}

/// Related terms for `word`, deduplicated and excluding `word` itself
///
/// Never fails: any lookup error yields an empty list. Source order is kept
/// so the first candidates are the ones the source ranked highest.
pub async fn related_terms<R: RelatedTermSource>(source: &R, word: &str) -> Vec<String> {
    let suggestions = match source.lookup(word).await {
        Ok(suggestions) => suggestions,
        Err(e) => {
            debug!("No related terms for '{}': {}", word, e);
            return Vec::new();
        }
    };

    let excluded = normalize_term(word);
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter_map(|s| {
            let key = normalize_term(&s)?;
            if excluded.as_ref() == Some(&key) || !seen.insert(key) {
                return None;
            }
            Some(s.trim().to_string())
        })
        .collect()
}

/// `RelatedTermSource` backed by the Bing open-search suggestion API
///
/// The endpoint answers `["<query>", ["suggestion", ...], ...]`. The echoed
/// query in position 0 is never a candidate.
#[derive(Debug, Clone)]
pub struct BingSuggestClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl BingSuggestClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `EnrichmentError::Http` if the HTTP client cannot be built.
    pub fn new(config: &SuggestClientConfig) -> Result<Self, EnrichmentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Extract the suggestion list from an open-search JSON payload
///
/// # Errors
///
/// Returns `EnrichmentError::Decode` when position 1 is missing or not an
/// array of strings.
pub fn parse_suggestions(payload: &serde_json::Value) -> Result<Vec<String>, EnrichmentError> {
    let list = payload
        .get(1)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| EnrichmentError::Decode("missing suggestion array".to_string()))?;

    list.iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| EnrichmentError::Decode(format!("non-string suggestion: {v}")))
        })
        .collect()
}

impl RelatedTermSource for BingSuggestClient {
    async fn lookup(&self, term: &str) -> Result<Vec<String>, EnrichmentError> {
        let mut url = Url::parse(&format!("{}/osjson.aspx", self.base_url))
            .map_err(|e| EnrichmentError::Http(format!("invalid suggest base URL: {e}")))?;
        url.query_pairs_mut().append_pair("query", term);

        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EnrichmentError::Status(status.as_u16()));
        }

        let payload: serde_json::Value = resp.json().await?;
        parse_suggestions(&payload)
    }
}
