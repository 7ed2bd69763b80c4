//! Property-based tests for the best-of aggregation.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use proptest::prelude::*;

use bestquote_core::cancel::CancellationToken;
use bestquote_core::quote::{price_ascending, Quote};
use bestquote_core::task::{FetchTask, FnFetchTask};
use bestquote_orchestration::aggregator::{run_fetch, Mode, RunOptions};

/// Build one deterministic task per (price-in-cents, delay-ms) entry.
fn make_tasks(entries: &[(u32, u8)]) -> Vec<Arc<dyn FetchTask>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, &(cents, delay_ms))| {
            let price = f64::from(cents) / 100.0;
            let delay = Duration::from_millis(u64::from(delay_ms));
            let name = format!("src-{i}");
            let quote_name = name.clone();
            let task: Arc<dyn FetchTask> =
                Arc::new(FnFetchTask::new(name, move |cancel: &CancellationToken| {
                    cancel.check_cancelled()?;
                    thread::sleep(delay);
                    Ok(Quote::new(quote_name.clone(), "META", price))
                }));
            task
        })
        .collect()
}

fn test_pool() -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// WaitAll returns the minimal price no matter how the delays permute
    /// the completion order.
    #[test]
    fn wait_all_minimum_is_latency_invariant(
        entries in proptest::collection::vec((0u32..10_000, 0u8..8), 1..6)
    ) {
        let pool = test_pool();
        let tasks = make_tasks(&entries);
        let cancel = CancellationToken::new();
        let best = run_fetch(
            &pool,
            &tasks,
            price_ascending,
            Mode::WaitAll,
            &RunOptions::default(),
            &cancel,
        )
        .unwrap();

        let expected = entries
            .iter()
            .map(|&(cents, _)| f64::from(cents) / 100.0)
            .fold(f64::INFINITY, f64::min);
        prop_assert!((best.price - expected).abs() < f64::EPSILON);
    }

    /// RaceFirst always returns a price belonging to one of the submitted
    /// tasks.
    #[test]
    fn race_returns_a_submitted_price(
        entries in proptest::collection::vec((0u32..10_000, 0u8..8), 1..6)
    ) {
        let pool = test_pool();
        let tasks = make_tasks(&entries);
        let cancel = CancellationToken::new();
        let quote = run_fetch(
            &pool,
            &tasks,
            price_ascending,
            Mode::RaceFirst,
            &RunOptions::default(),
            &cancel,
        )
        .unwrap();

        let submitted = entries
            .iter()
            .any(|&(cents, _)| (f64::from(cents) / 100.0 - quote.price).abs() < f64::EPSILON);
        prop_assert!(submitted, "price {} not among submitted tasks", quote.price);
    }
}
