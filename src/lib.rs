pub mod campaign;
pub mod config;
pub mod session;
pub mod terms;
pub mod utils;

pub use campaign::{
    CampaignError, CampaignEvent, CampaignReport, ChannelProgress, HumanPacer, NoDelay,
    NoOpProgress, Pacer, ProgressReporter, SearchCampaign, SearchEvaluator, Termination,
    TimeoutEscalation,
};
pub use config::{
    CampaignConfig, ConfigError, DelayRange, PacingConfig, RetryLadderConfig, SessionConfig,
    SuggestClientConfig, TermPoolConfig, TrendLocale, TrendsClientConfig,
};
pub use session::{ChromiumSession, SessionDriver, SessionError};
pub use terms::{
    BingSuggestClient, DataSourceError, EnrichmentError, GoogleTrendsClient, PoolSnapshot,
    RelatedTermSource, TermPool, TrendSource, TrendingTopic, related_terms,
};

/// Run one campaign with default pacing and no progress reporting
///
/// Convenience over [`SearchCampaign`] for callers that only need the report.
///
/// # Example
/// ```no_run
/// use kodegen_tools_rewards_search::*;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let trends = GoogleTrendsClient::new(&TrendsClientConfig::default())?;
///     let pool = TermPool::new(trends, TermPoolConfig::default());
///     let suggest = BingSuggestClient::new(&SuggestClientConfig::default())?;
///     let mut session = ChromiumSession::launch(SessionConfig::default()).await?;
///
///     let report = run_campaign(&CampaignConfig::default(), &pool, &suggest, &mut session, 30, 0).await?;
///     println!("{} searches raised the signal to {}", report.success_count, report.final_signal);
///
///     session.shutdown().await;
///     Ok(())
/// }
/// ```
pub async fn run_campaign<S, R, D>(
    config: &CampaignConfig,
    pool: &TermPool<S>,
    related: &R,
    driver: &mut D,
    target: usize,
    initial_baseline: u64,
) -> Result<CampaignReport, CampaignError>
where
    S: TrendSource,
    R: RelatedTermSource,
    D: SessionDriver,
{
    SearchCampaign::new(config, pool, related, driver)
        .run(target, initial_baseline)
        .await
}
