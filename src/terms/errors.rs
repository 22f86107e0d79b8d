//! Error types for term sourcing
//!
//! `DataSourceError` is loud: it propagates out of `TermPool::fetch` and
//! fails the campaign before the first search. `EnrichmentError` is quiet:
//! the related-term adapter downgrades it to "no related terms".

use thiserror::Error;

/// Failure fetching or decoding the trend feed
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("Trend feed request failed: {0}")]
    Http(String),

    /// Feed answered with a non-success status
    #[error("Trend feed returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded into trending topics
    #[error("Malformed trend feed response: {0}")]
    Malformed(String),

    /// Refill walked back `max_day_offset` days without reaching capacity
    #[error(
        "Trend feed exhausted after {max_day_offset} day(s): collected {collected} of {capacity} terms"
    )]
    FeedExhausted {
        max_day_offset: u32,
        collected: usize,
        capacity: usize,
    },
}

impl From<reqwest::Error> for DataSourceError {
    fn from(err: reqwest::Error) -> Self {
        DataSourceError::Http(err.to_string())
    }
}

/// Failure fetching related terms
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Suggestion request failed: {0}")]
    Http(String),

    #[error("Suggestion endpoint returned status {0}")]
    Status(u16),

    #[error("Unexpected suggestion payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for EnrichmentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EnrichmentError::Decode(err.to_string())
        } else {
            EnrichmentError::Http(err.to_string())
        }
    }
}
