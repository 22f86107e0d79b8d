//! Daily trending searches
//!
//! `TrendSource` is the seam the term pool refills through. The production
//! implementation queries the Google Trends daily-trends endpoint, which
//! guards its JSON with a fixed `)]}',\n` prefix that must be stripped before
//! decoding.

use std::future::Future;
use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::errors::DataSourceError;
use crate::config::{TrendLocale, TrendsClientConfig};
use crate::utils::constants::{TRENDS_NS_PARAM, TRENDS_RESPONSE_PREFIX_LEN};

/// One trending topic of a day: its headline query plus related queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingTopic {
    pub title: String,
    pub related_queries: Vec<String>,
}

impl TrendingTopic {
    pub fn new(title: impl Into<String>, related_queries: Vec<String>) -> Self {
        Self {
            title: title.into(),
            related_queries,
        }
    }

    /// Headline followed by related queries, as raw (unnormalised) strings
    pub fn queries(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(self.related_queries.iter().map(String::as_str))
    }
}

/// Source of trending topics, one day at a time
pub trait TrendSource: Send + Sync {
    /// Fetch the trending topics of the day `day_offset` days before today
    fn fetch_day(
        &self,
        locale: &TrendLocale,
        day_offset: u32,
    ) -> impl Future<Output = Result<Vec<TrendingTopic>, DataSourceError>> + Send;
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct DailyTrendsResponse {
    default: DailyTrendsPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyTrendsPayload {
    trending_searches_days: Vec<TrendingSearchesDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendingSearchesDay {
    #[serde(default)]
    trending_searches: Vec<TrendingSearch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendingSearch {
    title: QueryText,
    #[serde(default)]
    related_queries: Vec<QueryText>,
}

#[derive(Debug, Deserialize)]
struct QueryText {
    query: String,
}

/// Decode a daily-trends response body
///
/// Strips the fixed-length anti-JSON-hijacking prefix, then reads the first
/// `trendingSearchesDays` entry.
///
/// # Errors
///
/// Returns `DataSourceError::Malformed` if the body is shorter than the
/// prefix, is not valid JSON after it, or carries no trending day.
pub fn parse_daily_trends(body: &str) -> Result<Vec<TrendingTopic>, DataSourceError> {
    let json = body.get(TRENDS_RESPONSE_PREFIX_LEN..).ok_or_else(|| {
        DataSourceError::Malformed(format!(
            "response shorter than the {TRENDS_RESPONSE_PREFIX_LEN}-byte prefix ({} bytes)",
            body.len()
        ))
    })?;

    let response: DailyTrendsResponse =
        serde_json::from_str(json).map_err(|e| DataSourceError::Malformed(e.to_string()))?;

    let day = response
        .default
        .trending_searches_days
        .into_iter()
        .next()
        .ok_or_else(|| DataSourceError::Malformed("no trendingSearchesDays entry".to_string()))?;

    Ok(day
        .trending_searches
        .into_iter()
        .map(|search| TrendingTopic {
            title: search.title.query,
            related_queries: search.related_queries.into_iter().map(|q| q.query).collect(),
        })
        .collect())
}

/// Calendar date `day_offset` days before `today`
#[must_use]
pub fn trend_date(today: NaiveDate, day_offset: u32) -> Option<NaiveDate> {
    today.checked_sub_days(Days::new(u64::from(day_offset)))
}

/// `TrendSource` backed by the Google Trends daily-trends API
#[derive(Debug, Clone)]
pub struct GoogleTrendsClient {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTrendsClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError::Http` if the HTTP client cannot be built.
    pub fn new(config: &TrendsClientConfig) -> Result<Self, DataSourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn day_url(&self, locale: &TrendLocale, date: NaiveDate) -> Result<Url, DataSourceError> {
        let mut url = Url::parse(&format!("{}/trends/api/dailytrends", self.base_url))
            .map_err(|e| DataSourceError::Http(format!("invalid trends base URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("hl", &locale.language)
            .append_pair("ed", &date.format("%Y%m%d").to_string())
            .append_pair("geo", &locale.region)
            .append_pair("ns", TRENDS_NS_PARAM);
        Ok(url)
    }
}

impl TrendSource for GoogleTrendsClient {
    async fn fetch_day(
        &self,
        locale: &TrendLocale,
        day_offset: u32,
    ) -> Result<Vec<TrendingTopic>, DataSourceError> {
        let today = Utc::now().date_naive();
        let date = trend_date(today, day_offset).ok_or_else(|| {
            DataSourceError::Malformed(format!("day offset {day_offset} is out of calendar range"))
        })?;
        let url = self.day_url(locale, date)?;

        debug!("Fetching daily trends: {}", url);

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DataSourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let topics = parse_daily_trends(&body)?;
        debug!(
            "Daily trends for {} ({}-{}): {} topic(s)",
            date,
            locale.language,
            locale.region,
            topics.len()
        );
        Ok(topics)
    }
}
