//! Tests for the shared term pool
//!
//! Each test builds its own `TermPool` so suites can run in parallel.

use std::collections::HashSet;
use std::sync::Arc;

use kodegen_tools_rewards_search::config::TermPoolConfig;
use kodegen_tools_rewards_search::terms::{DataSourceError, TermPool, TrendingTopic};
use proptest::prelude::*;

mod common;
use common::StaticTrends;

fn pool_config(initial_capacity: usize, max_day_offset: u32) -> TermPoolConfig {
    TermPoolConfig {
        initial_capacity,
        max_day_offset,
        ..TermPoolConfig::default()
    }
}

#[tokio::test]
async fn test_case_variants_collapse_to_one_lowercase_term() {
    let trends = StaticTrends::new(vec![vec![
        TrendingTopic::new("Example Query", vec!["example query".to_string()]),
        TrendingTopic::new("EXAMPLE QUERY ", vec!["Other Thing".to_string()]),
    ]]);
    let pool = TermPool::new(trends, pool_config(2, 1));

    let batch = pool.fetch(1).await.unwrap();
    let snapshot = pool.snapshot().await;

    assert_eq!(batch, vec!["example query".to_string()]);
    assert_eq!(
        snapshot.terms,
        vec!["example query".to_string(), "other thing".to_string()]
    );
}

#[tokio::test]
async fn test_refill_walks_back_one_day_per_call() {
    let pool = TermPool::new(StaticTrends::generated(3), pool_config(7, 30));

    pool.fetch(2).await.unwrap();

    assert_eq!(pool.source().calls(), vec![1, 2, 3]);
    assert_eq!(pool.snapshot().await.terms.len(), 9);
}

#[tokio::test]
async fn test_batches_advance_cursor_in_delivery_order() {
    let pool = TermPool::new(StaticTrends::generated(10), pool_config(10, 30));

    let first = pool.fetch(3).await.unwrap();
    let second = pool.fetch(3).await.unwrap();
    let snapshot = pool.snapshot().await;

    assert_eq!(first, snapshot.terms[0..3].to_vec());
    assert_eq!(second, snapshot.terms[3..6].to_vec());
    assert_eq!(snapshot.cursor, 6);
    // No refill was needed for the second batch
    assert_eq!(pool.source().calls(), vec![1]);
}

#[tokio::test]
async fn test_exhaustion_resets_and_grows_capacity() {
    let pool = TermPool::new(StaticTrends::generated(4), pool_config(4, 30));

    pool.fetch(2).await.unwrap();
    pool.fetch(2).await.unwrap();
    let before = pool.snapshot().await;
    assert_eq!(before.cursor, 4);
    assert!(before.remaining() < 5);

    let batch = pool.fetch(5).await.unwrap();
    let after = pool.snapshot().await;

    assert!(after.capacity >= 10);
    assert!(after.terms.len() >= after.capacity);
    // Reset rewound the cursor to 0 before the batch was taken
    assert_eq!(after.cursor, 5);
    assert_eq!(batch, after.terms[0..5].to_vec());
}

#[tokio::test]
async fn test_capacity_never_shrinks() {
    let pool = TermPool::new(StaticTrends::generated(20), pool_config(4, 30));

    pool.fetch(10).await.unwrap();
    assert_eq!(pool.snapshot().await.capacity, 20);

    pool.fetch(1).await.unwrap();
    assert_eq!(pool.snapshot().await.capacity, 20);
}

#[tokio::test]
async fn test_zero_batch_leaves_pool_untouched() {
    let pool = TermPool::new(StaticTrends::generated(5), pool_config(5, 30));

    assert!(pool.fetch(0).await.unwrap().is_empty());
    assert!(pool.source().calls().is_empty());
    assert_eq!(pool.snapshot().await.cursor, 0);
}

#[tokio::test]
async fn test_failed_refill_leaves_state_unchanged() {
    let pool = TermPool::new(StaticTrends::generated(5), pool_config(5, 30));
    pool.fetch(4).await.unwrap();
    let before = pool.snapshot().await;

    // Larger than the remainder, so the pool must reset and refill
    pool.source().set_failing(true);
    let err = pool.fetch(7).await.unwrap_err();

    assert!(matches!(err, DataSourceError::Malformed(_)));
    assert_eq!(pool.snapshot().await, before);

    // Recovers once the feed does
    pool.source().set_failing(false);
    assert_eq!(pool.fetch(7).await.unwrap().len(), 7);
}

#[tokio::test]
async fn test_sparse_feed_hits_day_offset_ceiling() {
    let pool = TermPool::new(StaticTrends::generated(1), pool_config(10, 3));

    let err = pool.fetch(2).await.unwrap_err();

    match err {
        DataSourceError::FeedExhausted {
            max_day_offset,
            collected,
            capacity,
        } => {
            assert_eq!(max_day_offset, 3);
            assert_eq!(collected, 3);
            assert_eq!(capacity, 10);
        }
        other => panic!("expected FeedExhausted, got {other:?}"),
    }
    assert_eq!(pool.source().calls(), vec![1, 2, 3]);
    assert!(pool.snapshot().await.terms.is_empty());
}

#[tokio::test]
async fn test_explicit_reset_keeps_capacity() {
    let pool = TermPool::new(StaticTrends::generated(10), pool_config(10, 30));
    pool.fetch(8).await.unwrap();

    pool.reset().await;
    let snapshot = pool.snapshot().await;

    assert!(snapshot.terms.is_empty());
    assert_eq!(snapshot.cursor, 0);
    assert_eq!(snapshot.capacity, 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_campaigns_get_disjoint_batches() {
    let pool = Arc::new(TermPool::new(
        StaticTrends::generated(25),
        pool_config(100, 30),
    ));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = Arc::clone(&pool);
        handles.push(tokio::spawn(async move { pool.fetch(5).await }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        for term in handle.await.unwrap().unwrap() {
            assert!(seen.insert(term), "term handed out twice");
        }
    }
    assert_eq!(seen.len(), 40);
    assert_eq!(pool.snapshot().await.cursor, 40);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_cursor_monotonic_and_terms_distinct(
        per_day in 1usize..12,
        batches in prop::collection::vec(1usize..15, 1..12),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let pool = TermPool::new(StaticTrends::generated(per_day), pool_config(8, 200));
            let mut last = pool.snapshot().await;

            for n in batches {
                let batch = pool.fetch(n).await.unwrap();
                let now = pool.snapshot().await;

                prop_assert_eq!(batch.len(), n);
                prop_assert!(now.cursor <= now.terms.len());
                prop_assert!(now.capacity >= 2 * n);

                let distinct: HashSet<_> = now.terms.iter().collect();
                prop_assert_eq!(distinct.len(), now.terms.len());
                prop_assert!(now.terms.iter().all(|t| *t == t.to_lowercase()));

                if n <= last.remaining() {
                    // No reset: cursor only moves forward
                    prop_assert_eq!(now.cursor, last.cursor + n);
                } else {
                    prop_assert_eq!(now.cursor, n);
                }
                last = now;
            }
            Ok(())
        })?;
    }
}
