//! Term supply engine
//!
//! Sources candidate search terms from a trend feed into a shared,
//! deduplicated pool, and looks up related terms for fallback searches.

pub mod errors;
pub mod pool;
pub mod related;
pub mod trends;

pub use errors::{DataSourceError, EnrichmentError};
pub use pool::{PoolSnapshot, TermPool};
pub use related::{BingSuggestClient, RelatedTermSource, parse_suggestions, related_terms};
pub use trends::{GoogleTrendsClient, TrendSource, TrendingTopic, parse_daily_trends, trend_date};
